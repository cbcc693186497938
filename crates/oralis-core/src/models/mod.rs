pub mod audit;
pub mod driver;
pub mod intake;
pub mod progress;
pub mod qa;
pub mod report;
pub mod scenario;
pub mod section;
pub mod selection;
pub mod tag;
