use anchor_lang::prelude::*;

declare_id!("3eiv6gfufqjDWUgTfxni15o1sCZpc6yMRL3g3A3f35ax");

pub mod constants;
pub mod error;
pub mod event;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

use instructions::*;
use state::{ClaimRecord, PacketInfo};

/**
 * Red Packet Program
 *
 * A sender locks a fixed amount of tokens and splits it into a declared number
 * of equal shares. Any address may claim one share, first come first served,
 * until the shares run out or the optional deadline passes. The sender can
 * take back whatever is left.
 *
 * Key Features:
 * - Equal shares by floor division; the remainder is only ever recovered by the sender
 * - One claim per address per packet
 * - Optional expiry (end_time = 0 means none)
 * - Sender recovery at any time, at most once
 * - Read-only view instructions for list views
 * - Cross-program call event emission for composability
 * - Support for both SPL Token and Token 2022
 *
 * Architecture:
 * - Packet Counter PDA: Sequential id allocator shared by every sender
 * - Red Packet PDA: Packet parameters, counters and the claim log
 * - Token Vault PDA: Holds the packet's tokens
 * - Claim Status PDAs: Mark which addresses have claimed
 *
 * Workflow:
 * 1. Sender creates a packet and deposits tokens
 * 2. Claimers take one share each
 * 3. Sender recovers the remaining balance whenever they choose
 */
#[program]
pub mod red_packet {
    use super::*;

    /**
     * Creates a new red packet
     *
     * @param ctx - Account context containing counter, packet, vault and sender accounts
     * @param total_participants - Number of equal shares
     * @param end_time - Expiry timestamp, 0 for none
     * @param total_amount - Amount of tokens to lock
     *
     * Access Control: Anyone
     */
    pub fn create_red_packet(
        ctx: Context<CreateRedPacket>,
        total_participants: u32,
        end_time: i64,
        total_amount: u64,
    ) -> Result<()> {
        handle_create_red_packet(ctx, total_participants, end_time, total_amount)
    }

    /**
     * Claims one share of a red packet
     *
     * @param ctx - Account context containing packet, claim status and token accounts
     * @param id - Id of the red packet
     *
     * Access Control: Any address that has not claimed this packet yet
     */
    pub fn claim_red_packet(ctx: Context<ClaimRedPacket>, id: u64) -> Result<()> {
        handle_claim_red_packet(ctx, id)
    }

    /**
     * Recovers the unclaimed balance of a red packet
     *
     * @param ctx - Account context containing packet, vault and sender accounts
     * @param id - Id of the red packet
     *
     * Access Control: Packet sender only
     * Note: Does not require the packet to have expired
     */
    pub fn recover_remaining(ctx: Context<RecoverRemaining>, id: u64) -> Result<()> {
        handle_recover_remaining(ctx, id)
    }

    /// View: packet summary, zeroed for unknown ids
    pub fn get_packet_info(ctx: Context<GetPacketInfo>, id: u64) -> Result<PacketInfo> {
        handle_get_packet_info(ctx, id)
    }

    /// View: whether `user` has claimed packet `id`
    pub fn has_user_claimed(ctx: Context<HasUserClaimed>, id: u64, user: Pubkey) -> Result<bool> {
        handle_has_user_claimed(ctx, id, user)
    }

    /// View: one page of the claim log, starting at `start`
    pub fn get_claim_records(
        ctx: Context<GetClaimRecords>,
        id: u64,
        start: u32,
    ) -> Result<Vec<ClaimRecord>> {
        handle_get_claim_records(ctx, id, start)
    }

    /// View: number of packets ever created
    pub fn packet_counter(ctx: Context<GetPacketCounter>) -> Result<u64> {
        handle_get_packet_counter(ctx)
    }
}
