use anchor_lang::prelude::*;
use crate::utils::try_load_account;

/**
 * Individual claim status account
 *
 * Records that one address has taken its share of one red packet.
 * The set of claim status accounts with `claimed == true` for a packet is
 * the packet's claimer set.
 *
 * Derivation: ["claim", red_packet_key, claimer_key]
 *
 * Lifecycle:
 * 1. Created on the first claim attempt (using init_if_needed)
 * 2. Marked claimed in the same instruction that pays the share
 * 3. Never closed, since closing it would let the address claim again
 */
#[account]
#[derive(Default, Debug)]
pub struct ClaimStatus {
    /// Bump seed for PDA derivation
    pub bump: u8,
    /// Set once the share has been paid
    pub claimed: bool,
    /// Amount paid to this claimer
    pub amount: u64,
    /// Clock timestamp of the claim
    pub claimed_at: i64,
}

impl ClaimStatus {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + serialized fields
    pub const LEN: usize = 8 + 1 + 1 + 8 + 8;

    /// Whether the claim status stored at `info` marks a paid claim
    /// - Uninitialized or foreign-owned accounts read as not claimed
    pub fn read_claimed(info: &AccountInfo) -> Result<bool> {
        let claimed = try_load_account::<ClaimStatus>(info)?
            .is_some_and(|claim_status| claim_status.claimed);
        Ok(claimed)
    }
}
