mod login;
mod register;
mod user_detail;
mod user_photos;
mod users;

pub use login::LoginRegister;
pub use register::RegisterForm;
pub use user_detail::UserDetail;
pub use user_photos::UserPhotos;
pub use users::UserList;
