use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;

/// Account context for reading the claim log of packet `id`
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct GetClaimRecords<'info> {
    /// The red packet to read
    /// - Derived from: ["red_packet", id]
    /// CHECK: May be uninitialized; an empty list is returned in that case
    #[account(
        seeds = [RED_PACKET_SEED.as_bytes(), id.to_le_bytes().as_ref()],
        bump
    )]
    pub red_packet: UncheckedAccount<'info>,
}

/**
 * Returns claim records in application order, starting at index `start`
 *
 * At most CLAIM_RECORDS_PAGE_SIZE records come back per call because return
 * data is capped at 1 KiB. A page shorter than that is the last one.
 */
pub fn handle_get_claim_records(
    ctx: Context<GetClaimRecords>,
    _id: u64,
    start: u32,
) -> Result<Vec<ClaimRecord>> {
    RedPacket::read_claim_records(&ctx.accounts.red_packet.to_account_info(), start)
}
