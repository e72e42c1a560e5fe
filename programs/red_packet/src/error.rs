use anchor_lang::prelude::*;

#[error_code]
pub enum RedPacketError {
    // Creation errors
    #[msg("Total participants must be greater than zero")]
    InvalidParticipants,
    #[msg("Red packet amount must be greater than zero")]
    ZeroAmount,

    // Lookup errors
    #[msg("Red packet does not exist")]
    PacketNotFound,

    // Claim errors
    #[msg("You have already claimed this red packet")]
    AlreadyClaimed,
    #[msg("All slots are filled")]
    SlotsFilled,
    #[msg("Red packet has expired")]
    Expired,

    // Recovery errors
    #[msg("Red packet has already been recovered")]
    NotRecoverable,
    #[msg("Only the sender can recover")]
    Forbidden,
    #[msg("No remaining amount to recover")]
    NothingToRecover,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Token mint does not match the red packet's token mint")]
    TokenMintMismatch,
}
