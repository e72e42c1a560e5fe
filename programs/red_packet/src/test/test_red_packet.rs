use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::RedPacketError;
use crate::state::*;

const NOW: i64 = 1_700_000_000;

fn new_packet(total_amount: u64, total_participants: u32, end_time: i64) -> RedPacket {
    RedPacket::new(
        0,
        254,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        total_amount,
        total_participants,
        end_time,
    )
    .unwrap()
}

fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: RedPacketError) {
    let err = result.expect_err("operation should have been rejected");
    let expected: anchor_lang::error::Error = expected.into();
    assert_eq!(err, expected);
}

/// Checks the per-packet invariants against the claim statuses handed out so far
fn assert_invariants(packet: &RedPacket, statuses: &[ClaimStatus]) {
    let claimed_by = statuses.iter().filter(|status| status.claimed).count();

    assert!(packet.claimed_count <= packet.total_participants);
    assert_eq!(claimed_by, packet.claimed_count as usize);
    assert_eq!(packet.claim_records.len(), packet.claimed_count as usize);

    let paid = packet.claimed_amount().unwrap();
    assert!(paid + packet.recovered_amount <= packet.total_amount);
    if packet.is_exhausted() || !packet.is_recoverable {
        let settled = paid + packet.recovered_amount;
        if packet.is_recoverable {
            assert_eq!(paid, packet.share_amount() * packet.total_participants as u64);
        } else {
            assert_eq!(settled, packet.total_amount);
        }
    }

    let mut claimers: Vec<Pubkey> = packet.claim_records.iter().map(|r| r.claimer).collect();
    claimers.sort();
    claimers.dedup();
    assert_eq!(claimers.len(), packet.claim_records.len(), "claimer appears twice");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_round_trip() {
        let packet = new_packet(1_000, 4, NOW + 3_600);
        let info = packet.info();

        assert_eq!(info.total_amount, 1_000);
        assert_eq!(info.total_participants, 4);
        assert_eq!(info.end_time, NOW + 3_600);
        assert_eq!(info.claimed_count, 0);
        assert!(info.is_recoverable);
        assert_eq!(info.sender, packet.sender);
        assert_eq!(packet.recovered_amount, 0);
        assert!(packet.claim_records.is_empty());
        assert_eq!(packet.remaining_slots(), 4);
        assert_eq!(packet.remaining_amount().unwrap(), 1_000);
    }

    #[test]
    fn test_create_validation() {
        let sender = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let vault = Pubkey::new_unique();

        assert_error(
            RedPacket::new(0, 255, sender, mint, vault, 100, 0, 0),
            RedPacketError::InvalidParticipants,
        );
        assert_error(
            RedPacket::new(0, 255, sender, mint, vault, 0, 3, 0),
            RedPacketError::ZeroAmount,
        );
        // Zero participants is reported before zero amount
        assert_error(
            RedPacket::new(0, 255, sender, mint, vault, 0, 0, 0),
            RedPacketError::InvalidParticipants,
        );

        // No upper bound on shares; the claim log grows as claims arrive
        assert!(RedPacket::new(0, 255, sender, mint, vault, 1, u32::MAX, 0).is_ok());
        // end_time is not checked against the clock
        assert!(RedPacket::new(0, 255, sender, mint, vault, 1, 1, 1).is_ok());
    }

    #[test]
    fn test_floor_division_remainder_stays_with_sender() {
        // 100 split three ways pays 33 each; the 1 left over is never paid to a claimer
        let mut packet = new_packet(100, 3, 0);
        let mut statuses = vec![ClaimStatus::default(), ClaimStatus::default(), ClaimStatus::default()];

        for status in statuses.iter_mut() {
            let record = packet.claim(status, Pubkey::new_unique(), NOW).unwrap();
            assert_eq!(record.amount, 33);
        }
        assert_invariants(&packet, &statuses);

        assert_eq!(packet.claimed_amount().unwrap(), 99);
        assert_eq!(packet.remaining_amount().unwrap(), 1);

        let mut late = ClaimStatus::default();
        assert_error(
            packet.claim(&mut late, Pubkey::new_unique(), NOW),
            RedPacketError::SlotsFilled,
        );

        let sender = packet.sender;
        assert_eq!(packet.recover(&sender).unwrap(), 1);
        assert_invariants(&packet, &statuses);
    }

    #[test]
    fn test_payout_independent_of_claim_order() {
        let claimers = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

        for order in orders {
            let mut packet = new_packet(100, 3, 0);
            let mut statuses = vec![ClaimStatus::default(); 3];

            for &index in order.iter() {
                let record = packet
                    .claim(&mut statuses[index], claimers[index], NOW)
                    .unwrap();
                assert_eq!(record.amount, 33, "order {:?}", order);
            }

            let applied: Vec<Pubkey> = packet.claim_records.iter().map(|r| r.claimer).collect();
            let expected: Vec<Pubkey> = order.iter().map(|&i| claimers[i]).collect();
            assert_eq!(applied, expected);
            assert_invariants(&packet, &statuses);
        }
    }

    #[test]
    fn test_double_claim_rejected_without_state_change() {
        let mut packet = new_packet(90, 3, 0);
        let claimer = Pubkey::new_unique();
        let mut status = ClaimStatus::default();

        packet.claim(&mut status, claimer, NOW).unwrap();
        assert!(status.claimed);
        assert_eq!(status.amount, 30);
        assert_eq!(status.claimed_at, NOW);

        let before_count = packet.claimed_count;
        let before_records = packet.claim_records.clone();

        assert_error(
            packet.claim(&mut status, claimer, NOW + 1),
            RedPacketError::AlreadyClaimed,
        );
        assert_eq!(packet.claimed_count, before_count);
        assert_eq!(packet.claim_records, before_records);
        assert_eq!(status.claimed_at, NOW);
    }

    #[test]
    fn test_expiry_boundary() {
        let end_time = NOW + 60;

        let mut packet = new_packet(300, 3, end_time);
        let mut early = ClaimStatus::default();
        assert!(packet.claim(&mut early, Pubkey::new_unique(), NOW + 59).is_ok());

        let mut at_deadline = ClaimStatus::default();
        assert!(packet.claim(&mut at_deadline, Pubkey::new_unique(), end_time).is_ok());

        let mut late = ClaimStatus::default();
        assert_error(
            packet.claim(&mut late, Pubkey::new_unique(), NOW + 61),
            RedPacketError::Expired,
        );
        assert!(!late.claimed);
        assert_eq!(packet.claimed_count, 2);
    }

    #[test]
    fn test_no_expiry_when_end_time_is_zero() {
        let mut packet = new_packet(10, 1, 0);
        assert!(!packet.is_expired(i64::MAX));

        let mut status = ClaimStatus::default();
        assert!(packet.claim(&mut status, Pubkey::new_unique(), i64::MAX).is_ok());
    }

    #[test]
    fn test_already_expired_packet_is_recoverable_but_not_claimable() {
        let mut packet = new_packet(500, 5, NOW - 1);

        let mut status = ClaimStatus::default();
        assert_error(
            packet.claim(&mut status, Pubkey::new_unique(), NOW),
            RedPacketError::Expired,
        );

        let sender = packet.sender;
        assert_eq!(packet.recover(&sender).unwrap(), 500);
        assert!(!packet.is_recoverable);
    }

    #[test]
    fn test_exhaustion_race_single_slot() {
        let mut packet = new_packet(42, 1, 0);
        let mut first = ClaimStatus::default();
        let mut second = ClaimStatus::default();

        let record = packet.claim(&mut first, Pubkey::new_unique(), NOW).unwrap();
        assert_eq!(record.amount, 42);

        assert_error(
            packet.claim(&mut second, Pubkey::new_unique(), NOW),
            RedPacketError::SlotsFilled,
        );
        assert!(!second.claimed);
        assert_eq!(packet.claimed_count, 1);
        assert_invariants(&packet, &[first, second]);
    }

    #[test]
    fn test_forbidden_recovery() {
        let mut packet = new_packet(100, 2, 0);
        let stranger = Pubkey::new_unique();

        assert_error(packet.recover(&stranger), RedPacketError::Forbidden);
        assert!(packet.is_recoverable);
        assert_eq!(packet.recovered_amount, 0);
    }

    #[test]
    fn test_recovery_fires_once() {
        let mut packet = new_packet(100, 4, NOW + 1_000);
        let mut status = ClaimStatus::default();
        packet.claim(&mut status, Pubkey::new_unique(), NOW).unwrap();

        // Early recovery: before expiry and with slots still open
        let sender = packet.sender;
        assert_eq!(packet.recover(&sender).unwrap(), 75);
        assert_eq!(packet.recovered_amount, 75);
        assert_eq!(packet.remaining_amount().unwrap(), 0);

        assert_error(packet.recover(&sender), RedPacketError::NotRecoverable);
        assert_eq!(packet.recovered_amount, 75);
        assert_invariants(&packet, &[status]);
    }

    #[test]
    fn test_claim_after_recovery_rejected() {
        let mut packet = new_packet(100, 4, 0);
        let sender = packet.sender;
        packet.recover(&sender).unwrap();

        let mut status = ClaimStatus::default();
        assert_error(
            packet.claim(&mut status, Pubkey::new_unique(), NOW),
            RedPacketError::NotRecoverable,
        );
        assert_eq!(packet.claimed_count, 0);
        assert!(!status.claimed);
    }

    #[test]
    fn test_fully_claimed_even_split_has_nothing_to_recover() {
        let mut packet = new_packet(100, 4, 0);
        let mut statuses = vec![ClaimStatus::default(); 4];
        for status in statuses.iter_mut() {
            packet.claim(status, Pubkey::new_unique(), NOW).unwrap();
        }

        let sender = packet.sender;
        assert_error(packet.recover(&sender), RedPacketError::NothingToRecover);
        assert!(packet.is_recoverable);
        assert_invariants(&packet, &statuses);
    }

    #[test]
    fn test_zero_share_packet() {
        // Fewer base units than shares: every claim pays nothing but still takes a slot
        let mut packet = new_packet(2, 5, 0);
        assert_eq!(packet.share_amount(), 0);

        let mut statuses = vec![ClaimStatus::default(); 5];
        for status in statuses.iter_mut() {
            let record = packet.claim(status, Pubkey::new_unique(), NOW).unwrap();
            assert_eq!(record.amount, 0);
        }
        assert!(packet.is_exhausted());

        let sender = packet.sender;
        assert_eq!(packet.recover(&sender).unwrap(), 2);
        assert_invariants(&packet, &statuses);
    }

    #[test]
    fn test_claim_rejection_order() {
        // Already claimed wins over a full packet
        let mut packet = new_packet(10, 1, NOW + 10);
        let claimer = Pubkey::new_unique();
        let mut status = ClaimStatus::default();
        packet.claim(&mut status, claimer, NOW).unwrap();
        assert_error(packet.claim(&mut status, claimer, NOW + 20), RedPacketError::AlreadyClaimed);

        // A full packet wins over expiry
        let mut other = ClaimStatus::default();
        assert_error(
            packet.claim(&mut other, Pubkey::new_unique(), NOW + 20),
            RedPacketError::SlotsFilled,
        );

        // Expiry wins over recovery
        let mut packet = new_packet(10, 2, NOW + 10);
        let sender = packet.sender;
        packet.recover(&sender).unwrap();
        assert_error(
            packet.claim(&mut other, Pubkey::new_unique(), NOW + 20),
            RedPacketError::Expired,
        );
    }

    #[test]
    fn test_recover_rejection_order() {
        let mut packet = new_packet(10, 1, 0);
        let sender = packet.sender;
        packet.recover(&sender).unwrap();

        // A stranger is told Forbidden even once the packet is spent
        assert_error(packet.recover(&Pubkey::new_unique()), RedPacketError::Forbidden);
        assert_error(packet.recover(&sender), RedPacketError::NotRecoverable);
    }

    #[test]
    fn test_claim_records_paging() {
        let mut packet = new_packet(4_500, 45, 0);
        let mut statuses = vec![ClaimStatus::default(); 45];
        for (offset, status) in statuses.iter_mut().enumerate() {
            packet
                .claim(status, Pubkey::new_unique(), NOW + offset as i64)
                .unwrap();
        }

        let first = packet.claim_records_page(0);
        let second = packet.claim_records_page(CLAIM_RECORDS_PAGE_SIZE);
        let last = packet.claim_records_page(2 * CLAIM_RECORDS_PAGE_SIZE);

        assert_eq!(first.len(), CLAIM_RECORDS_PAGE_SIZE as usize);
        assert_eq!(second.len(), CLAIM_RECORDS_PAGE_SIZE as usize);
        assert_eq!(last.len(), 5);
        assert!(packet.claim_records_page(45).is_empty());
        assert!(packet.claim_records_page(u32::MAX).is_empty());

        let all: Vec<ClaimRecord> = first.into_iter().chain(second).chain(last).collect();
        assert_eq!(all, packet.claim_records);
        assert!(all.windows(2).all(|pair| pair[0].timestamp < pair[1].timestamp));
        assert_invariants(&packet, &statuses);
    }

    #[test]
    fn test_empty_packet_has_no_records() {
        let packet = new_packet(10, 2, 0);
        assert!(packet.claim_records_page(0).is_empty());
    }

    #[test]
    fn test_many_shares_fill_up() {
        let mut packet = new_packet(1_000_000, 500, 0);
        let mut statuses = vec![ClaimStatus::default(); 500];

        for (index, status) in statuses.iter_mut().enumerate() {
            let record = packet.claim(status, Pubkey::new_unique(), NOW + index as i64).unwrap();
            assert_eq!(record.amount, 2_000);
        }
        assert!(packet.is_exhausted());
        assert_eq!(packet.claim_records.len(), 500);
        assert_invariants(&packet, &statuses);

        let mut late = ClaimStatus::default();
        assert_error(
            packet.claim(&mut late, Pubkey::new_unique(), NOW),
            RedPacketError::SlotsFilled,
        );
        assert_eq!(packet.claim_records_page(480).len(), 20);
    }

    #[test]
    fn test_packet_counter_is_sequential() {
        let mut counter = PacketCounter::default();
        assert_eq!(counter.next_id().unwrap(), 0);
        assert_eq!(counter.next_id().unwrap(), 1);
        assert_eq!(counter.next_id().unwrap(), 2);
        assert_eq!(counter.count, 3);

        let mut exhausted = PacketCounter { bump: 255, count: u64::MAX };
        assert_error(exhausted.next_id(), RedPacketError::ArithmeticOverflow);
        assert_eq!(exhausted.count, u64::MAX);
    }

    #[test]
    fn test_invariants_over_mixed_sequence() {
        // Deterministic pseudo-random mix of claims, repeats and late attempts
        let mut packet = new_packet(1_003, 7, NOW + 500);
        let claimers: Vec<Pubkey> = (0..10).map(|_| Pubkey::new_unique()).collect();
        let mut statuses = vec![ClaimStatus::default(); claimers.len()];

        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for step in 0..60i64 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let index = (seed >> 33) as usize % claimers.len();
            let now = NOW + step * 10;

            let before = packet.claimed_count;
            match packet.claim(&mut statuses[index], claimers[index], now) {
                Ok(record) => {
                    assert_eq!(record.amount, 143);
                    assert_eq!(packet.claimed_count, before + 1);
                }
                Err(_) => assert_eq!(packet.claimed_count, before),
            }
            assert_invariants(&packet, &statuses);
        }

        let sender = packet.sender;
        let paid = packet.claimed_amount().unwrap();
        assert_eq!(packet.recover(&sender).unwrap(), 1_003 - paid);
        assert_invariants(&packet, &statuses);
    }
}
