use anchor_lang::prelude::*;
use crate::error::*;
use crate::utils::try_load_account;

/**
 * Packet counter account
 *
 * Process-wide allocator for red packet ids. Ids start at 0, increase by one
 * per created packet and are never reused.
 *
 * Derivation: ["packet_counter"]
 *
 * Lifecycle:
 * 1. Created by the first create_red_packet (using init_if_needed)
 * 2. Incremented by every later creation
 */
#[account]
#[derive(Default, Debug)]
pub struct PacketCounter {
    /// Bump seed for PDA derivation
    pub bump: u8,
    /// Number of packets created so far, which is also the next id
    pub count: u64,
}

impl PacketCounter {
    /// Calculate the space required for this account
    /// - Includes 8-byte discriminator + serialized fields
    pub const LEN: usize = 8 + 1 + 8;

    /// Packets created so far according to the counter at `info`, 0 before the first creation
    pub fn read_count(info: &AccountInfo) -> Result<u64> {
        let count = try_load_account::<PacketCounter>(info)?.map_or(0, |counter| counter.count);
        Ok(count)
    }

    /// Hands out the current id and advances the counter
    pub fn next_id(&mut self) -> Result<u64> {
        let id = self.count;
        self.count = self
            .count
            .checked_add(1)
            .ok_or(RedPacketError::ArithmeticOverflow)?;
        Ok(id)
    }
}
