use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;

/// Account context for reading the number of packets ever created
#[derive(Accounts)]
pub struct GetPacketCounter<'info> {
    /// CHECK: Uninitialized until the first packet is created
    #[account(
        seeds = [PACKET_COUNTER_SEED.as_bytes()],
        bump
    )]
    pub packet_counter: UncheckedAccount<'info>,
}

/// Returns the next id to be assigned; valid packet ids are `0..count`
pub fn handle_get_packet_counter(ctx: Context<GetPacketCounter>) -> Result<u64> {
    PacketCounter::read_count(&ctx.accounts.packet_counter.to_account_info())
}
