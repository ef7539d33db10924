pub mod company;
pub mod monitoring;
pub mod preference;
pub mod user;

pub use company::Company;
pub use monitoring::MonitoringData;
pub use preference::DashboardPreference;
pub use user::User;
