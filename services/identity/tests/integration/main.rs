
mod csrf_test;
mod register_test;
mod router_test;
mod session_test;
mod verify_test;
