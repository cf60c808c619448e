use anchor_lang::prelude::*;

use crate::errors::PlazaError;
use crate::state::EntityId;

// =============================================================================
// INTERACTION LEDGER
// =============================================================================
//
// Per (entity, voter):  NoVote -> Up | Down,  Up <-> Down.
//
// There is no retract. Repeating the current vote is a DuplicateVote; the
// opposite vote moves one count between buckets in a single write of the tally
// account.
// =============================================================================

/// Vote direction. Wire tags: 1 = Up, 2 = Down (0 is "no vote").
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub const fn tag(self) -> u8 {
        match self {
            VoteType::Up => 1,
            VoteType::Down => 2,
        }
    }
}

impl TryFrom<u8> for VoteType {
    type Error = anchor_lang::error::Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(VoteType::Up),
            2 => Ok(VoteType::Down),
            _ => err!(PlazaError::InvalidVoteType),
        }
    }
}

/// Up/down counts for one entity
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub up_count: u64,
    pub down_count: u64,
}

#[account]
#[derive(Debug, Default, PartialEq)]
pub struct VoteTally {
    pub entity_id: EntityId,
    pub up_count: u64,
    pub down_count: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl VoteTally {
    pub const SEED: &'static [u8] = b"tally";

    pub const SIZE: usize = 8 + 32 + 8 + 8 + 1;

    pub fn address(entity_id: &EntityId) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, entity_id.as_ref()], &crate::ID)
    }

    pub fn tally(&self) -> Tally {
        Tally {
            up_count: self.up_count,
            down_count: self.down_count,
        }
    }

    /// Move one voter from `previous` to `next`.
    ///
    /// Both counts are computed before either is stored, so a failure leaves
    /// the tally untouched.
    pub fn transition(&mut self, previous: Option<VoteType>, next: VoteType) -> Result<()> {
        let mut up = self.up_count;
        let mut down = self.down_count;

        match previous {
            Some(prev) if prev == next => return err!(PlazaError::DuplicateVote),
            Some(VoteType::Up) => {
                up = up.checked_sub(1).ok_or(PlazaError::ArithmeticOverflow)?;
            }
            Some(VoteType::Down) => {
                down = down.checked_sub(1).ok_or(PlazaError::ArithmeticOverflow)?;
            }
            None => {}
        }

        match next {
            VoteType::Up => up = up.checked_add(1).ok_or(PlazaError::ArithmeticOverflow)?,
            VoteType::Down => down = down.checked_add(1).ok_or(PlazaError::ArithmeticOverflow)?,
        }

        self.up_count = up;
        self.down_count = down;
        Ok(())
    }
}

/// The live vote of one identity on one entity
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct VoteRecord {
    pub entity_id: EntityId,
    /// Effective identity of the voter (never the delegate key)
    pub voter: Pubkey,
    /// None until the first vote lands
    pub vote: Option<VoteType>,
    pub voted_at: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl VoteRecord {
    pub const SEED: &'static [u8] = b"vote";

    pub const SIZE: usize = 8 +     // discriminator
        32 +                         // entity_id
        32 +                         // voter
        2 +                          // vote (Option<VoteType>)
        8 +                          // voted_at
        1;                           // bump

    pub fn address(entity_id: &EntityId, voter: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, entity_id.as_ref(), voter.as_ref()], &crate::ID)
    }

    /// Apply `next` to this record and its entity's tally.
    pub fn cast(&mut self, tally: &mut VoteTally, next: VoteType, now: i64) -> Result<()> {
        tally.transition(self.vote, next)?;
        self.vote = Some(next);
        self.voted_at = now;
        Ok(())
    }
}
