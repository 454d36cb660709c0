pub mod completion_service;
