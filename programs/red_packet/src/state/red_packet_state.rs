use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;
use crate::state::ClaimStatus;
use crate::utils::{store_account, try_load_account};

/// One successful claim, appended to the packet's claim log in application order
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimRecord {
    /// Address that received the share
    pub claimer: Pubkey,
    /// Amount paid out
    pub amount: u64,
    /// Clock timestamp of the claim
    pub timestamp: i64,
}

impl ClaimRecord {
    /// Serialized size of one record
    pub const LEN: usize = 32 + 8 + 8;
}

/// Summary returned by `get_packet_info`
///
/// The default value (sender = `Pubkey::default()`) stands for a packet that does not exist.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PacketInfo {
    pub sender: Pubkey,
    pub total_amount: u64,
    pub total_participants: u32,
    pub claimed_count: u32,
    pub is_recoverable: bool,
    pub end_time: i64,
}

/**
 * Red packet state account
 *
 * A fixed amount of tokens split into `total_participants` equal shares.
 * Each address may claim one share, first come first served, until the
 * shares run out or `end_time` passes. The sender may recover whatever
 * has not been claimed, once.
 *
 * Derivation: ["red_packet", id]
 *
 * Lifecycle:
 * 1. Created during create_red_packet with an empty claim log
 * 2. Updated by each claim (claimed_count, claim_records), growing by one record
 * 3. Updated once by recover_remaining (is_recoverable, recovered_amount)
 * 4. Never closed, so reads keep working after the packet is spent
 *
 * A packet is spent when it is exhausted or recovered. That is derived from
 * the counters and is not stored separately.
 */
#[account]
#[derive(Default, Debug)]
pub struct RedPacket {
    /// Bump seed for PDA derivation
    /// - Saved to sign vault transfers without recomputation
    pub bump: u8,

    /// Sequential id assigned by the packet counter
    pub id: u64,

    /// Creator of the packet
    /// - The only address allowed to recover the remaining balance
    pub sender: Pubkey,

    /// Token mint being distributed
    pub token_mint: Pubkey,

    /// Token vault account address
    /// - Derived from: ["vault", red_packet_key]
    pub token_vault: Pubkey,

    /// Amount locked at creation
    pub total_amount: u64,

    /// Number of shares declared at creation
    pub total_participants: u32,

    /// Number of shares paid out
    /// - Increases by exactly one per claim, never exceeds total_participants
    pub claimed_count: u32,

    /// Expiry timestamp, 0 means no expiry
    /// - Claims fail once the clock is strictly past this value
    pub end_time: i64,

    /// True until the sender recovers the remaining balance
    pub is_recoverable: bool,

    /// Amount returned to the sender by recovery, 0 until then
    pub recovered_amount: u64,

    /// Append-only claim log, one entry per claim
    pub claim_records: Vec<ClaimRecord>,
}

impl RedPacket {
    /// Space taken by everything except the claim records
    pub const BASE_LEN: usize = 8 // discriminator
        + 1   // bump
        + 8   // id
        + 32  // sender
        + 32  // token_mint
        + 32  // token_vault
        + 8   // total_amount
        + 4   // total_participants
        + 4   // claimed_count
        + 8   // end_time
        + 1   // is_recoverable
        + 8   // recovered_amount
        + 4;  // claim_records length prefix

    /// Calculate the space required for a packet holding `record_count` claim records
    /// - Packets start at BASE_LEN and grow by ClaimRecord::LEN per claim
    pub fn space(record_count: u32) -> usize {
        Self::BASE_LEN + record_count as usize * ClaimRecord::LEN
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        bump: u8,
        sender: Pubkey,
        token_mint: Pubkey,
        token_vault: Pubkey,
        total_amount: u64,
        total_participants: u32,
        end_time: i64,
    ) -> Result<Self> {
        require!(total_participants > 0, RedPacketError::InvalidParticipants);
        require!(total_amount > 0, RedPacketError::ZeroAmount);

        Ok(Self {
            bump,
            id,
            sender,
            token_mint,
            token_vault,
            total_amount,
            total_participants,
            claimed_count: 0,
            end_time,
            is_recoverable: true,
            recovered_amount: 0,
            claim_records: Vec::new(),
        })
    }

    /// Loads an initialized packet, failing with `PacketNotFound` otherwise
    pub fn load(info: &AccountInfo) -> Result<Self> {
        let packet = try_load_account::<RedPacket>(info)?.ok_or(RedPacketError::PacketNotFound)?;
        Ok(packet)
    }

    /// Packet summary read from `info`, zeroed when the packet does not exist
    pub fn read_info(info: &AccountInfo) -> Result<PacketInfo> {
        let packet_info = try_load_account::<RedPacket>(info)?
            .map(|red_packet| red_packet.info())
            .unwrap_or_default();
        Ok(packet_info)
    }

    /// One page of the claim log read from `info`, empty when the packet does not exist
    pub fn read_claim_records(info: &AccountInfo, start: u32) -> Result<Vec<ClaimRecord>> {
        let records = try_load_account::<RedPacket>(info)?
            .map(|red_packet| red_packet.claim_records_page(start))
            .unwrap_or_default();
        Ok(records)
    }

    /// Writes the packet back into its account
    /// - The account must already be sized to `space(claimed_count)`
    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        store_account(self, info)
    }

    /// Amount paid for every share
    ///
    /// Floor division: the remainder `total_amount % total_participants` is never
    /// handed to a claimer. It stays in the vault until the sender recovers it,
    /// which keeps the payout identical whatever order the claims land in.
    pub fn share_amount(&self) -> u64 {
        self.total_amount
            .checked_div(self.total_participants as u64)
            .unwrap_or(0)
    }

    /// Sum of every amount in the claim log
    pub fn claimed_amount(&self) -> Result<u64> {
        let claimed = self
            .claim_records
            .iter()
            .try_fold(0u64, |total, record| total.checked_add(record.amount))
            .ok_or(RedPacketError::ArithmeticOverflow)?;
        Ok(claimed)
    }

    /// Balance still held for this packet
    pub fn remaining_amount(&self) -> Result<u64> {
        let remaining = self
            .total_amount
            .checked_sub(self.claimed_amount()?)
            .and_then(|amount| amount.checked_sub(self.recovered_amount))
            .ok_or(RedPacketError::ArithmeticOverflow)?;
        Ok(remaining)
    }

    /// Shares not yet claimed
    pub fn remaining_slots(&self) -> u32 {
        self.total_participants.saturating_sub(self.claimed_count)
    }

    /// True once every share has been claimed
    pub fn is_exhausted(&self) -> bool {
        self.claimed_count >= self.total_participants
    }

    /// A claim landing exactly at `end_time` is still accepted
    pub fn is_expired(&self, now: i64) -> bool {
        self.end_time != 0 && now > self.end_time
    }

    /**
     * Pays one share to `claimer`
     *
     * Validation order:
     * 1. Claimer has not claimed this packet before
     * 2. A slot is still free
     * 3. The packet has not expired
     * 4. The packet has not been recovered
     *
     * Both the packet and the claim status are updated before the caller moves
     * any tokens, so a re-entrant claim sees the slot as consumed.
     */
    pub fn claim(
        &mut self,
        claim_status: &mut ClaimStatus,
        claimer: Pubkey,
        now: i64,
    ) -> Result<ClaimRecord> {
        require!(!claim_status.claimed, RedPacketError::AlreadyClaimed);
        require!(!self.is_exhausted(), RedPacketError::SlotsFilled);
        require!(!self.is_expired(now), RedPacketError::Expired);
        require!(self.is_recoverable, RedPacketError::NotRecoverable);

        let record = ClaimRecord {
            claimer,
            amount: self.share_amount(),
            timestamp: now,
        };

        self.claimed_count = self
            .claimed_count
            .checked_add(1)
            .ok_or(RedPacketError::ArithmeticOverflow)?;
        self.claim_records.push(record);

        claim_status.claimed = true;
        claim_status.amount = record.amount;
        claim_status.claimed_at = now;

        Ok(record)
    }

    /**
     * Marks the packet recovered and returns the amount owed to the sender
     *
     * Recovery does not wait for expiry or exhaustion: the sender may cancel
     * early and take back every unclaimed share plus the division remainder.
     */
    pub fn recover(&mut self, caller: &Pubkey) -> Result<u64> {
        require_keys_eq!(*caller, self.sender, RedPacketError::Forbidden);
        require!(self.is_recoverable, RedPacketError::NotRecoverable);

        let remaining = self.remaining_amount()?;
        require!(remaining > 0, RedPacketError::NothingToRecover);

        self.is_recoverable = false;
        self.recovered_amount = remaining;

        Ok(remaining)
    }

    pub fn info(&self) -> PacketInfo {
        PacketInfo {
            sender: self.sender,
            total_amount: self.total_amount,
            total_participants: self.total_participants,
            claimed_count: self.claimed_count,
            is_recoverable: self.is_recoverable,
            end_time: self.end_time,
        }
    }

    /// At most CLAIM_RECORDS_PAGE_SIZE records starting at `start`
    pub fn claim_records_page(&self, start: u32) -> Vec<ClaimRecord> {
        self.claim_records
            .iter()
            .skip(start as usize)
            .take(CLAIM_RECORDS_PAGE_SIZE as usize)
            .copied()
            .collect()
    }
}
