pub mod enums;
pub mod event;
pub mod feature;
pub mod user;
pub mod variable;
