pub mod channels;
pub mod memberships;
pub mod rooms;
pub mod users;
