pub mod ai_analyst;
pub mod market_feed;
pub mod signal_service;

pub use ai_analyst::AiAnalystService;
pub use market_feed::SimulatedFeed;
pub use signal_service::SignalService;
