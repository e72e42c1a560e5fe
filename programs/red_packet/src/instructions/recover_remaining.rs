use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::error::*;
use crate::constants::*;
use crate::utils::transfer_token;
use crate::event::*;

/**
 * Account context for recovering the unclaimed balance of a red packet
 *
 * Access Control: Only the packet sender, checked against the stored sender
 *
 * Business Logic:
 * - Allowed at any time while the packet is still recoverable, before expiry
 *   or exhaustion included, so the sender can cancel early
 * - Returns every unclaimed share plus the floor-division remainder
 * - Can succeed at most once per packet
 * - Accounts stay open so the packet remains readable
 */
#[event_cpi]
#[derive(Accounts)]
#[instruction(id: u64)]
pub struct RecoverRemaining<'info> {
    /// The red packet to recover
    /// - Derived from: ["red_packet", id]
    /// CHECK: Deserialized in the handler; empty means the packet does not exist
    #[account(
        mut,
        seeds = [RED_PACKET_SEED.as_bytes(), id.to_le_bytes().as_ref()],
        bump
    )]
    pub red_packet: UncheckedAccount<'info>,

    /// Token vault holding the packet's tokens
    /// - Derived from: ["vault", red_packet_key]
    /// CHECK: Address pinned by seeds; the token program validates it during the transfer
    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), red_packet.key().as_ref()],
        bump
    )]
    pub token_vault: UncheckedAccount<'info>,

    /// Sender's token account receiving the remaining balance
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = sender,
        token::token_program = token_program,
    )]
    pub sender_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The token mint, must match the packet's mint
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Caller claiming to be the packet sender
    pub sender: Signer<'info>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Returns the unclaimed balance to the sender and closes the packet to claims
 *
 * @param ctx - The account context containing all required accounts
 * @param id - Id of the red packet
 *
 * Validation Rules:
 * - Packet exists and the mint matches
 * - Caller is the sender
 * - Packet has not been recovered yet
 * - Something is left to recover
 */
pub fn handle_recover_remaining(ctx: Context<RecoverRemaining>, id: u64) -> Result<()> {
    let red_packet_info = ctx.accounts.red_packet.to_account_info();

    // ===== VALIDATION PHASE =====

    let mut red_packet = RedPacket::load(&red_packet_info)?;
    require_keys_eq!(
        ctx.accounts.token_mint.key(),
        red_packet.token_mint,
        RedPacketError::TokenMintMismatch
    );

    let current_time = Clock::get()?.unix_timestamp;
    let sender = ctx.accounts.sender.key();

    // ===== EFFECTS PHASE (State Updates) =====

    let remaining_amount = red_packet.recover(&sender)?;
    red_packet.store(&red_packet_info)?;

    // ===== INTERACTIONS PHASE (Token Transfer) =====

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
        ctx.accounts.sender_token_account.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        remaining_amount,
        ctx.accounts.token_mint.decimals,
        Some(signer),
    )?;

    msg!(
        "red packet {} recovered by {}: {} returned ({} of {} shares unclaimed)",
        id,
        sender,
        remaining_amount,
        red_packet.remaining_slots(),
        red_packet.total_participants
    );

    emit_cpi!(RedPacketRecovered {
        id,
        sender,
        remaining_amount,
        timestamp: current_time,
    });

    Ok(())
}
