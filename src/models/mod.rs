pub mod backup;
pub mod currency;
pub mod dashboard;
pub mod history;
pub mod payment;
pub mod property;
pub mod receipt;
pub mod settings;
pub mod tenant;
pub mod user;

pub use backup::*;
pub use currency::*;
pub use dashboard::*;
pub use history::*;
pub use payment::*;
pub use property::*;
pub use receipt::*;
pub use settings::*;
pub use tenant::*;
pub use user::*;
