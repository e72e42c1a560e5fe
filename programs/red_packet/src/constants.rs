use anchor_lang::prelude::*;

/**
 * Program Constants
 *
 * PDA seeds and read paging of the red packet program.
 */

/// ===== READ CONSTANTS =====

/// Number of claim records returned by one `get_claim_records` call
/// - Return data is capped at 1024 bytes; 20 records take 4 + 20 * 48 = 964 bytes
#[constant]
pub const CLAIM_RECORDS_PAGE_SIZE: u32 = 20;

/// ===== PDA SEED CONSTANTS =====

/// Seed for the global packet counter PDA
/// - Used in: ["packet_counter"]
/// - One counter per program; its value is the next packet id
#[constant]
pub const PACKET_COUNTER_SEED: &str = "packet_counter";

/// Seed for red packet PDA derivation
/// - Used in: ["red_packet", id]
/// - The id is encoded as little-endian u64
#[constant]
pub const RED_PACKET_SEED: &str = "red_packet";

/// Seed for token vault PDA derivation
/// - Used in: ["vault", red_packet_key]
/// - The vault's token authority is the red packet PDA
#[constant]
pub const VAULT_SEED: &str = "vault";

/// Seed for claim status PDA derivation
/// - Used in: ["claim", red_packet_key, claimer_key]
/// - The account existing with `claimed == true` is what marks a claimer as paid
#[constant]
pub const CLAIM_SEED: &str = "claim";
