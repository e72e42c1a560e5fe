use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;

/**
 * Account context for reading a red packet summary
 *
 * Read-only; clients call it through transaction simulation and read the
 * return data.
 */
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct GetPacketInfo<'info> {
    /// The red packet to read
    /// - Derived from: ["red_packet", id]
    /// CHECK: May be uninitialized; a zeroed summary is returned in that case
    #[account(
        seeds = [RED_PACKET_SEED.as_bytes(), id.to_le_bytes().as_ref()],
        bump
    )]
    pub red_packet: UncheckedAccount<'info>,
}

/**
 * Returns (sender, total_amount, total_participants, claimed_count, is_recoverable, end_time)
 *
 * Unknown ids do not fail: the result is `PacketInfo::default()`, whose sender
 * is the all-zero key, so list views can skip holes.
 */
pub fn handle_get_packet_info(ctx: Context<GetPacketInfo>, _id: u64) -> Result<PacketInfo> {
    RedPacket::read_info(&ctx.accounts.red_packet.to_account_info())
}
