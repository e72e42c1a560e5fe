use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;

/// Account context for checking whether `user` has claimed packet `id`
#[derive(Accounts)]
#[instruction(id: u64, user: Pubkey)]
pub struct HasUserClaimed<'info> {
    /// CHECK: Only used to derive the claim status address
    #[account(
        seeds = [RED_PACKET_SEED.as_bytes(), id.to_le_bytes().as_ref()],
        bump
    )]
    pub red_packet: UncheckedAccount<'info>,

    /// Claim status of `user` for this packet
    /// - Derived from: ["claim", red_packet_key, user]
    /// CHECK: Usually uninitialized for users that never claimed
    #[account(
        seeds = [CLAIM_SEED.as_bytes(), red_packet.key().as_ref(), user.as_ref()],
        bump
    )]
    pub claim_status: UncheckedAccount<'info>,
}

/// Returns false for unknown packets and for users that never claimed
pub fn handle_has_user_claimed(ctx: Context<HasUserClaimed>, _id: u64, _user: Pubkey) -> Result<bool> {
    ClaimStatus::read_claimed(&ctx.accounts.claim_status.to_account_info())
}
