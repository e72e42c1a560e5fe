use crate::constants::*;
use crate::event::*;
use crate::state::*;
use crate::utils::transfer_token;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/**
 * Account context for creating a new red packet
 *
 * This instruction:
 * - Creates the global packet counter on first use
 * - Creates a red packet PDA whose id is the current counter value
 * - Creates a token vault PDA owned by the red packet
 * - Transfers the full amount from the sender into the vault
 *
 * Access Control: Anyone can create a red packet
 */
#[event_cpi]
#[derive(Accounts)]
pub struct CreateRedPacket<'info> {
    /// Global packet counter (PDA)
    /// - Its current value becomes the new packet id
    /// - Derived from: ["packet_counter"]
    #[account(
        init_if_needed,
        payer = sender,
        space = PacketCounter::LEN,
        seeds = [PACKET_COUNTER_SEED.as_bytes()],
        bump
    )]
    pub packet_counter: Account<'info, PacketCounter>,

    /// The red packet account (PDA)
    /// - Starts with an empty claim log; each claim grows it by one record
    /// - Derived from: ["red_packet", packet_counter.count]
    #[account(
        init,
        payer = sender,
        space = RedPacket::space(0),
        seeds = [
            RED_PACKET_SEED.as_bytes(),
            packet_counter.count.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub red_packet: Account<'info, RedPacket>,

    /// Token vault account (PDA) that holds the packet's tokens
    /// - Controlled by the red packet PDA as token authority
    /// - Derived from: ["vault", red_packet_key]
    #[account(
        init,
        token::mint = token_mint,
        token::authority = red_packet,
        token::token_program = token_program,
        seeds = [VAULT_SEED.as_bytes(), red_packet.key().as_ref()],
        bump,
        payer = sender,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// The token mint being distributed
    #[account(
        token::token_program = token_program,
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    /// Sender's token account funding the packet
    #[account(
        mut,
        token::mint = token_mint,
        token::authority = sender,
        token::token_program = token_program,
    )]
    pub sender_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Creator of the red packet
    /// - Pays for the new accounts
    /// - Is the only address allowed to recover the remaining balance
    #[account(mut)]
    pub sender: Signer<'info>,

    pub system_program: Program<'info, System>,

    /// Token program (supports both SPL Token and Token 2022)
    pub token_program: Interface<'info, TokenInterface>,
}

/**
 * Creates a red packet and locks its tokens in the vault
 *
 * @param ctx - The account context containing all required accounts
 * @param total_participants - Number of shares, at least 1
 * @param end_time - Expiry timestamp, 0 for none; not checked against the clock
 * @param total_amount - Amount to lock, in base units of the mint
 */
pub fn handle_create_red_packet(
    ctx: Context<CreateRedPacket>,
    total_participants: u32,
    end_time: i64,
    total_amount: u64,
) -> Result<()> {
    let packet_counter = &mut ctx.accounts.packet_counter;
    packet_counter.bump = ctx.bumps.packet_counter;

    let id = packet_counter.next_id()?;

    let red_packet = RedPacket::new(
        id,
        ctx.bumps.red_packet,
        ctx.accounts.sender.key(),
        ctx.accounts.token_mint.key(),
        ctx.accounts.token_vault.key(),
        total_amount,
        total_participants,
        end_time,
    )?;
    ctx.accounts.red_packet.set_inner(red_packet);

    transfer_token(
        ctx.accounts.sender.to_account_info(),
        ctx.accounts.sender_token_account.to_account_info(),
        ctx.accounts.token_vault.to_account_info(),
        ctx.accounts.token_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        total_amount,
        ctx.accounts.token_mint.decimals,
        None,
    )?;

    msg!(
        "red packet {} created: {} split into {} shares, end_time {}",
        id,
        total_amount,
        total_participants,
        end_time
    );

    emit_cpi!(RedPacketCreated {
        id,
        red_packet: ctx.accounts.red_packet.key(),
        sender: ctx.accounts.sender.key(),
        token_mint: ctx.accounts.token_mint.key(),
        total_amount,
        total_participants,
        end_time,
    });

    Ok(())
}
