use anchor_lang::prelude::*;

/// Event emitted when a new red packet is created
#[event]
pub struct RedPacketCreated {
    /// Sequential id of the red packet
    pub id: u64,
    /// The red packet account public key
    pub red_packet: Pubkey,
    /// Creator of the red packet
    pub sender: Pubkey,
    /// Token mint address
    pub token_mint: Pubkey,
    /// Amount locked in the vault
    pub total_amount: u64,
    /// Number of shares
    pub total_participants: u32,
    /// Expiry timestamp, 0 when the packet never expires
    pub end_time: i64,
}

/// Event emitted when a share is claimed
#[event]
pub struct RedPacketClaimed {
    /// Sequential id of the red packet
    pub id: u64,
    /// Address of the claimer
    pub claimer: Pubkey,
    /// Amount paid to the claimer
    pub amount: u64,
    /// Clock timestamp of the claim
    pub timestamp: i64,
    /// Shares claimed so far, this one included
    pub claimed_count: u32,
}

/// Event emitted when the sender recovers the unclaimed balance
#[event]
pub struct RedPacketRecovered {
    /// Sequential id of the red packet
    pub id: u64,
    /// Sender who recovered the balance
    pub sender: Pubkey,
    /// Amount returned to the sender
    pub remaining_amount: u64,
    /// Clock timestamp of the recovery
    pub timestamp: i64,
}
