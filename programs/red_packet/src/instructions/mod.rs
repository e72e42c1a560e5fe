pub mod create_red_packet;
pub mod claim_red_packet;
pub mod recover_remaining;
pub mod get_packet_info;
pub mod has_user_claimed;
pub mod get_claim_records;
pub mod get_packet_counter;

pub use create_red_packet::*;
pub use claim_red_packet::*;
pub use recover_remaining::*;
pub use get_packet_info::*;
pub use has_user_claimed::*;
pub use get_claim_records::*;
pub use get_packet_counter::*;
