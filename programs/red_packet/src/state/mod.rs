pub mod counter_state;
pub mod red_packet_state;
pub mod claim_state;

pub use counter_state::*;
pub use red_packet_state::*;
pub use claim_state::*;
