use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::utils::{grow_account, transfer_token};
use crate::event::*;

/**
 * Account context for claiming one share of a red packet
 *
 * The red packet and its vault are taken unchecked so that an unknown id
 * fails with PacketNotFound rather than an account deserialization error.
 * Their addresses are still pinned by seeds.
 *
 * Access Control: Any address, once per packet
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct ClaimRedPacket<'info> {
    /// The red packet being claimed
    /// - Derived from: ["red_packet", id]
    /// CHECK: Deserialized in the handler; empty means the packet does not exist
    #[account(
        mut,
        seeds = [RED_PACKET_SEED.as_bytes(), id.to_le_bytes().as_ref()],
        bump
    )]
    pub red_packet: UncheckedAccount<'info>,

    /// Claim status for this claimer
    /// - Derived from: ["claim", red_packet_key, claimer_key]
    #[account(
        init_if_needed,
        payer = claimer,
        space = ClaimStatus::LEN,
        seeds = [CLAIM_SEED.as_bytes(), red_packet.key().as_ref(), claimer.key().as_ref()],
        bump
    )]
    pub claim_status: Account<'info, ClaimStatus>,

    /// Token vault holding the packet's tokens
    /// - Derived from: ["vault", red_packet_key]
    /// CHECK: Address pinned by seeds; the token program validates it during the transfer
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), red_packet.key().as_ref()],
        bump
    )]
    pub token_vault: UncheckedAccount<'info>,

    /// Claimer's token account receiving the share
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = claimer,
        token::token_program = token_program,
    )]
    pub claimer_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The token mint, must match the packet's mint
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// The address claiming a share
    /// - Pays rent for the claim status and for the claim record added to the packet
    #[account(mut)]
    pub claimer: Signer<'info>,

    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Pays one equal share of the red packet to the claimer
 *
 * @param ctx - The account context containing all required accounts
 * @param id - Id of the red packet
 *
 * Validation Process:
 * 1. Packet exists and the mint matches
 * 2. Claimer has not claimed before
 * 3. A slot is free, the packet has not expired or been recovered
 * 4. Record the claim, then transfer the share
 */
pub fn handle_claim_red_packet(ctx: Context<ClaimRedPacket>, id: u64) -> Result<()> {
    let red_packet_info = ctx.accounts.red_packet.to_account_info();

    // ===== VALIDATION PHASE =====

    let mut red_packet = RedPacket::load(&red_packet_info)?;
    require_keys_eq!(
        ctx.accounts.token_mint.key(),
        red_packet.token_mint,
        RedPacketError::TokenMintMismatch
    );

    let current_time = Clock::get()?.unix_timestamp;
    let claimer = ctx.accounts.claimer.key();

    // ===== EFFECTS PHASE (State Updates) =====

    let claim_status = &mut ctx.accounts.claim_status;
    claim_status.bump = ctx.bumps.claim_status;
    let record = red_packet.claim(claim_status, claimer, current_time)?;

    // The claim log grows by one record; the claimer pays the extra rent
    grow_account(
        &red_packet_info,
        ctx.accounts.claimer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        RedPacket::space(red_packet.claimed_count),
    )?;
    red_packet.store(&red_packet_info)?;

    // ===== INTERACTIONS PHASE (Token Transfer) =====

    if record.amount > 0 {
        let id_bytes = id.to_le_bytes();
        let seeds = &[
            RED_PACKET_SEED.as_bytes(),
            id_bytes.as_ref(),
            &[red_packet.bump],
        ];
        let signer = &[&seeds[..]];

        transfer_token(
            red_packet_info,
            ctx.accounts.token_vault.to_account_info(),
            ctx.accounts.claimer_token_account.to_account_info(),
            ctx.accounts.token_mint.to_account_info(),
            ctx.accounts.token_program.to_account_info(),
            record.amount,
            ctx.accounts.token_mint.decimals,
            Some(signer),
        )?;
    }

    msg!(
        "red packet {} claimed by {}: {} ({}/{})",
        id,
        claimer,
        record.amount,
        red_packet.claimed_count,
        red_packet.total_participants
    );

    emit_cpi!(RedPacketClaimed {
        id,
        claimer,
        amount: record.amount,
        timestamp: record.timestamp,
        claimed_count: red_packet.claimed_count,
    });

    Ok(())
}
