pub mod handle_route;
