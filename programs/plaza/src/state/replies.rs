use std::ops::Range;

use anchor_lang::prelude::*;

use crate::errors::PlazaError;
use crate::state::{reply_entity_id, ContentType, EntityId};

// =============================================================================
// REPLY LEDGER
// =============================================================================
//
// Replies are arena-stored per parent entity: slot `position` of entity E
// lives at PDA ["reply", E, position] and slots are never reused or
// renumbered. Deleting tombstones the slot in place.
//
// Every reply also gets a global `reply_id` (starting at 1) from the
// ReplyLedger singleton. The id names the reply as an entity of its own
// (ContentType::Reply), and ReplyLocator maps it back to its slot.
//
// Depth counts from the registry content a thread hangs off. A reply posted
// under another reply's entity id continues that reply's depth, so both ways
// of nesting share one MAX_REPLY_DEPTH bound.
// =============================================================================

pub const MAX_REPLY_LENGTH: usize = 2000;

/// Deepest allowed nesting below a top-level reply
pub const MAX_REPLY_DEPTH: u8 = 8;

/// Global reply id counter
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct ReplyLedger {
    /// Number of replies ever issued; also the last issued id
    pub reply_count: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl ReplyLedger {
    pub const SEED: &'static [u8] = b"reply_ledger";

    pub const SIZE: usize = 8 + 8 + 1;

    pub fn address() -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED], &crate::ID)
    }

    /// The id the next reply will receive
    pub fn peek_next_id(&self) -> u64 {
        self.reply_count.saturating_add(1)
    }

    pub fn issue_id(&mut self) -> Result<u64> {
        let id = self
            .reply_count
            .checked_add(1)
            .ok_or(PlazaError::ArithmeticOverflow)?;
        self.reply_count = id;
        Ok(id)
    }

    pub fn contains(&self, reply_id: u64) -> bool {
        reply_id != 0 && reply_id <= self.reply_count
    }
}

/// Ordered reply slots of one parent entity
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct ReplyList {
    pub entity_id: EntityId,
    /// Number of slots ever used, deleted ones included
    pub reply_count: u64,
    /// Depth of replies posted directly under the entity
    pub depth: u8,
    /// PDA bump seed
    pub bump: u8,
}

/// What an author submits; everything else is assigned by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyDraft {
    pub author: Pubkey,
    pub sender: Pubkey,
    pub content: String,
    /// Reply this one answers within the same entity, 0 for top level
    pub parent_reply_id: u64,
}

impl ReplyList {
    pub const SEED: &'static [u8] = b"reply_list";

    pub const SIZE: usize = 8 + 32 + 8 + 1 + 1;

    pub fn address(entity_id: &EntityId) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, entity_id.as_ref()], &crate::ID)
    }

    /// Slots covered by a page request
    pub fn page(&self, offset: u64, count: u64) -> Range<u64> {
        page_range(self.reply_count, offset, count)
    }

    /// Append `draft` in the next slot and draw its id from `ledger`.
    ///
    /// Validation runs before either counter moves.
    pub fn append(
        &mut self,
        ledger: &mut ReplyLedger,
        draft: ReplyDraft,
        parent: Option<&Reply>,
        now: i64,
    ) -> Result<Reply> {
        validate_reply_content(&draft.content)?;
        let depth = self.child_depth(parent, draft.parent_reply_id)?;

        let position = self.reply_count;
        let next_count = position
            .checked_add(1)
            .ok_or(PlazaError::ArithmeticOverflow)?;
        let reply_id = ledger.issue_id()?;
        self.reply_count = next_count;

        Ok(Reply {
            reply_id,
            parent_entity: self.entity_id,
            position,
            parent_reply_id: draft.parent_reply_id,
            depth,
            author: draft.author,
            sender: draft.sender,
            content: draft.content,
            created_at: now,
            edited_at: None,
            is_deleted: false,
            bump: 0,
        })
    }

    /// Depth of a new reply answering `parent_reply_id` in this list.
    pub fn child_depth(&self, parent: Option<&Reply>, parent_reply_id: u64) -> Result<u8> {
        if parent_reply_id == 0 {
            return Ok(self.depth);
        }
        let Some(parent) = parent else {
            return err!(PlazaError::InvalidParentReply);
        };
        require!(
            parent.reply_id == parent_reply_id && parent.parent_entity == self.entity_id,
            PlazaError::InvalidParentReply
        );
        require!(parent.depth < MAX_REPLY_DEPTH, PlazaError::ReplyTooDeep);
        Ok(parent.depth + 1)
    }
}

/// Depth of replies posted directly under `(contract_ref, content_type, index)`.
///
/// Registry content starts at 0. A reply issued by this program must exist,
/// be passed as `replied`, and still have room below it.
pub fn thread_base_depth(
    contract_ref: &Pubkey,
    content_type: ContentType,
    index: u64,
    ledger: &ReplyLedger,
    replied: Option<&Reply>,
) -> Result<u8> {
    if content_type != ContentType::Reply || *contract_ref != crate::ID {
        return Ok(0);
    }
    require!(ledger.contains(index), PlazaError::IndexOutOfBounds);
    let Some(replied) = replied else {
        return err!(PlazaError::InvalidParentReply);
    };
    require!(replied.reply_id == index, PlazaError::InvalidParentReply);
    require!(replied.depth < MAX_REPLY_DEPTH, PlazaError::ReplyTooDeep);
    Ok(replied.depth + 1)
}

/// Clamp `offset..offset + count` to `0..total`; empty when `offset >= total`.
pub fn page_range(total: u64, offset: u64, count: u64) -> Range<u64> {
    if offset >= total {
        return total..total;
    }
    offset..offset.saturating_add(count).min(total)
}

/// Maps a global reply id back to its slot
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct ReplyLocator {
    pub reply_id: u64,
    pub parent_entity: EntityId,
    pub position: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl ReplyLocator {
    pub const SEED: &'static [u8] = b"reply_locator";

    pub const SIZE: usize = 8 + 8 + 32 + 8 + 1;

    pub fn address(reply_id: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED, &reply_id.to_le_bytes()], &crate::ID)
    }

    pub fn for_reply(reply: &Reply, bump: u8) -> Self {
        Self {
            reply_id: reply.reply_id,
            parent_entity: reply.parent_entity,
            position: reply.position,
            bump,
        }
    }

    /// Whether `reply` is the slot this locator points at
    pub fn locates(&self, reply: &Reply) -> bool {
        reply.reply_id == self.reply_id
            && reply.parent_entity == self.parent_entity
            && reply.position == self.position
    }
}

#[account]
#[derive(Debug, Default, PartialEq)]
pub struct Reply {
    /// Global id, names this reply as an entity
    pub reply_id: u64,
    /// Entity this reply was posted under
    pub parent_entity: EntityId,
    /// Slot within the parent entity's list
    pub position: u64,
    /// 0 for a top-level reply
    pub parent_reply_id: u64,
    pub depth: u8,
    /// Effective identity
    pub author: Pubkey,
    /// Raw signer, differs from `author` when a delegate posted
    pub sender: Pubkey,
    pub content: String,
    pub created_at: i64,
    pub edited_at: Option<i64>,
    pub is_deleted: bool,
    /// PDA bump seed
    pub bump: u8,
}

impl Reply {
    pub const SEED: &'static [u8] = b"reply";

    pub const SIZE: usize = 8 +     // discriminator
        8 +                          // reply_id
        32 +                         // parent_entity
        8 +                          // position
        8 +                          // parent_reply_id
        1 +                          // depth
        32 +                         // author
        32 +                         // sender
        4 + MAX_REPLY_LENGTH +       // content
        8 +                          // created_at
        9 +                          // edited_at (Option<i64>)
        1 +                          // is_deleted
        1;                           // bump

    pub fn address(parent_entity: &EntityId, position: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::SEED, parent_entity.as_ref(), &position.to_le_bytes()],
            &crate::ID,
        )
    }

    /// This reply's own entity id, usable for votes and further replies
    pub fn entity_id(&self) -> EntityId {
        reply_entity_id(self.reply_id)
    }

    pub fn edit(&mut self, editor: &Pubkey, content: String, now: i64) -> Result<()> {
        require_keys_eq!(self.author, *editor, PlazaError::NotAuthorized);
        require!(!self.is_deleted, PlazaError::ReplyAlreadyDeleted);
        validate_reply_content(&content)?;

        self.content = content;
        self.edited_at = Some(now);
        Ok(())
    }

    /// Clear the content and mark the slot deleted; the slot itself stays.
    pub fn tombstone(&mut self, editor: &Pubkey) -> Result<()> {
        require_keys_eq!(self.author, *editor, PlazaError::NotAuthorized);
        require!(!self.is_deleted, PlazaError::ReplyAlreadyDeleted);

        self.content.clear();
        self.is_deleted = true;
        Ok(())
    }
}

pub fn validate_reply_content(content: &str) -> Result<()> {
    require!(!content.is_empty(), PlazaError::ContentEmpty);
    require!(content.len() <= MAX_REPLY_LENGTH, PlazaError::ContentTooLong);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_plaza_error;
    use crate::state::compute_entity_id;

    fn thread_entity() -> EntityId {
        compute_entity_id(&Pubkey::new_unique(), ContentType::ForumThread, 0)
    }

    fn list_for(entity_id: EntityId) -> ReplyList {
        ReplyList {
            entity_id,
            ..ReplyList::default()
        }
    }

    fn draft(author: Pubkey, content: &str) -> ReplyDraft {
        ReplyDraft {
            author,
            sender: author,
            content: content.to_string(),
            parent_reply_id: 0,
        }
    }

    #[test]
    fn page_range_clamps() {
        assert_eq!(page_range(5, 0, 5), 0..5);
        assert_eq!(page_range(5, 1, 2), 1..3);
        assert_eq!(page_range(5, 3, 10), 3..5);
        assert_eq!(page_range(5, 0, u64::MAX), 0..5);
        assert_eq!(page_range(5, 4, 0), 4..4);
    }

    #[test]
    fn page_beyond_end_is_empty() {
        assert!(page_range(5, 5, 10).is_empty());
        assert!(page_range(5, 99, 1).is_empty());
        assert!(page_range(0, 0, 10).is_empty());
    }

    #[test]
    fn ids_start_at_one_and_positions_at_zero() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut first = list_for(thread_entity());
        let mut second = list_for(thread_entity());

        let a = first.append(&mut ledger, draft(author, "a"), None, 1).unwrap();
        let b = second.append(&mut ledger, draft(author, "b"), None, 2).unwrap();
        let c = first.append(&mut ledger, draft(author, "c"), None, 3).unwrap();

        assert_eq!((a.reply_id, a.position), (1, 0));
        assert_eq!((b.reply_id, b.position), (2, 0));
        assert_eq!((c.reply_id, c.position), (3, 1));
        assert_eq!(ledger.reply_count, 3);
        assert_eq!(first.reply_count, 2);
        assert!(ledger.contains(3));
        assert!(!ledger.contains(0));
        assert!(!ledger.contains(4));
        assert_eq!(ledger.peek_next_id(), 4);
    }

    #[test]
    fn rejected_content_does_not_consume_slots() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());

        assert_plaza_error(
            list.append(&mut ledger, draft(author, ""), None, 1),
            PlazaError::ContentEmpty,
        );
        let long = "x".repeat(MAX_REPLY_LENGTH + 1);
        assert_plaza_error(
            list.append(&mut ledger, draft(author, &long), None, 1),
            PlazaError::ContentTooLong,
        );
        assert_eq!(ledger.reply_count, 0);
        assert_eq!(list.reply_count, 0);

        let max = "x".repeat(MAX_REPLY_LENGTH);
        assert!(list.append(&mut ledger, draft(author, &max), None, 1).is_ok());
    }

    #[test]
    fn nested_replies_track_depth() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());

        let top = list.append(&mut ledger, draft(author, "top"), None, 1).unwrap();
        let child_draft = ReplyDraft {
            parent_reply_id: top.reply_id,
            ..draft(author, "child")
        };
        let child = list.append(&mut ledger, child_draft, Some(&top), 2).unwrap();
        assert_eq!(top.depth, 0);
        assert_eq!(child.depth, 1);
        assert_eq!(child.parent_reply_id, top.reply_id);
    }

    #[test]
    fn parent_must_match_entity_and_id() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());
        let mut other = list_for(thread_entity());

        let top = list.append(&mut ledger, draft(author, "top"), None, 1).unwrap();
        let foreign = other.append(&mut ledger, draft(author, "elsewhere"), None, 1).unwrap();

        let missing = ReplyDraft { parent_reply_id: top.reply_id, ..draft(author, "x") };
        assert_plaza_error(
            list.append(&mut ledger, missing, None, 2),
            PlazaError::InvalidParentReply,
        );

        let wrong_id = ReplyDraft { parent_reply_id: top.reply_id + 10, ..draft(author, "x") };
        assert_plaza_error(
            list.append(&mut ledger, wrong_id, Some(&top), 2),
            PlazaError::InvalidParentReply,
        );

        let cross = ReplyDraft { parent_reply_id: foreign.reply_id, ..draft(author, "x") };
        assert_plaza_error(
            list.append(&mut ledger, cross, Some(&foreign), 2),
            PlazaError::InvalidParentReply,
        );
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let list = list_for(thread_entity());
        let deepest = Reply {
            reply_id: 9,
            parent_entity: list.entity_id,
            depth: MAX_REPLY_DEPTH,
            ..Reply::default()
        };
        assert_plaza_error(list.child_depth(Some(&deepest), 9), PlazaError::ReplyTooDeep);

        let almost = Reply { depth: MAX_REPLY_DEPTH - 1, ..deepest };
        assert_eq!(list.child_depth(Some(&almost), 9).unwrap(), MAX_REPLY_DEPTH);
    }

    #[test]
    fn replying_to_a_reply_entity_continues_its_depth() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());
        let mut current = list.append(&mut ledger, draft(author, "root"), None, 1).unwrap();

        for expected in 1..=MAX_REPLY_DEPTH {
            let depth = thread_base_depth(
                &crate::ID,
                ContentType::Reply,
                current.reply_id,
                &ledger,
                Some(&current),
            )
            .unwrap();
            let mut below = ReplyList {
                entity_id: current.entity_id(),
                depth,
                ..ReplyList::default()
            };
            current = below.append(&mut ledger, draft(author, "deeper"), None, 2).unwrap();
            assert_eq!(current.depth, expected);
        }

        assert_plaza_error(
            thread_base_depth(
                &crate::ID,
                ContentType::Reply,
                current.reply_id,
                &ledger,
                Some(&current),
            ),
            PlazaError::ReplyTooDeep,
        );
    }

    #[test]
    fn nested_parents_inside_a_reply_entity_share_the_bound() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());
        let root = list.append(&mut ledger, draft(author, "root"), None, 1).unwrap();

        let mut below = ReplyList {
            entity_id: root.entity_id(),
            depth: MAX_REPLY_DEPTH,
            ..ReplyList::default()
        };
        let top = below.append(&mut ledger, draft(author, "last level"), None, 2).unwrap();
        assert_eq!(top.depth, MAX_REPLY_DEPTH);

        let child = ReplyDraft { parent_reply_id: top.reply_id, ..draft(author, "too deep") };
        assert_plaza_error(
            below.append(&mut ledger, child, Some(&top), 3),
            PlazaError::ReplyTooDeep,
        );
    }

    #[test]
    fn reply_entities_must_name_an_issued_reply() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());
        let first = list.append(&mut ledger, draft(author, "first"), None, 1).unwrap();
        let second = list.append(&mut ledger, draft(author, "second"), None, 2).unwrap();

        assert_plaza_error(
            thread_base_depth(&crate::ID, ContentType::Reply, 99, &ledger, None),
            PlazaError::IndexOutOfBounds,
        );
        assert_plaza_error(
            thread_base_depth(&crate::ID, ContentType::Reply, 0, &ledger, Some(&first)),
            PlazaError::IndexOutOfBounds,
        );
        assert_plaza_error(
            thread_base_depth(&crate::ID, ContentType::Reply, first.reply_id, &ledger, None),
            PlazaError::InvalidParentReply,
        );
        assert_plaza_error(
            thread_base_depth(
                &crate::ID,
                ContentType::Reply,
                first.reply_id,
                &ledger,
                Some(&second),
            ),
            PlazaError::InvalidParentReply,
        );
    }

    #[test]
    fn registry_content_starts_at_depth_zero() {
        let ledger = ReplyLedger::default();
        let registry = Pubkey::new_unique();
        for content_type in [
            ContentType::UserPost,
            ContentType::ChatMessage,
            ContentType::ForumThread,
            ContentType::Reply,
        ] {
            assert_eq!(thread_base_depth(&registry, content_type, 5, &ledger, None).unwrap(), 0);
        }
        assert_eq!(
            thread_base_depth(&crate::ID, ContentType::ForumThread, 5, &ledger, None).unwrap(),
            0
        );
    }

    #[test]
    fn locator_matches_only_its_slot() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());
        let first = list.append(&mut ledger, draft(author, "first"), None, 1).unwrap();
        let second = list.append(&mut ledger, draft(author, "second"), None, 2).unwrap();

        let locator = ReplyLocator::for_reply(&first, 0);
        assert!(locator.locates(&first));
        assert!(!locator.locates(&second));
    }

    #[test]
    fn only_the_author_edits() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());
        let mut reply = list.append(&mut ledger, draft(author, "first"), None, 1).unwrap();

        assert_plaza_error(
            reply.edit(&Pubkey::new_unique(), "hacked".to_string(), 2),
            PlazaError::NotAuthorized,
        );
        assert_plaza_error(reply.edit(&author, String::new(), 2), PlazaError::ContentEmpty);

        reply.edit(&author, "second".to_string(), 3).unwrap();
        assert_eq!(reply.content, "second");
        assert_eq!(reply.edited_at, Some(3));
        assert_eq!(reply.created_at, 1);
    }

    #[test]
    fn delete_tombstones_once() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());
        let mut reply = list.append(&mut ledger, draft(author, "bye"), None, 1).unwrap();

        assert_plaza_error(reply.tombstone(&Pubkey::new_unique()), PlazaError::NotAuthorized);
        reply.tombstone(&author).unwrap();
        assert!(reply.is_deleted);
        assert!(reply.content.is_empty());
        assert_eq!(reply.position, 0);

        assert_plaza_error(reply.tombstone(&author), PlazaError::ReplyAlreadyDeleted);
        assert_plaza_error(
            reply.edit(&author, "back".to_string(), 2),
            PlazaError::ReplyAlreadyDeleted,
        );
        assert_eq!(list.reply_count, 1);
    }

    #[test]
    fn replies_are_entities() {
        let author = Pubkey::new_unique();
        let mut ledger = ReplyLedger::default();
        let mut list = list_for(thread_entity());
        let reply = list.append(&mut ledger, draft(author, "hi"), None, 1).unwrap();
        assert_eq!(
            reply.entity_id(),
            compute_entity_id(&crate::ID, ContentType::Reply, reply.reply_id)
        );
        assert_ne!(reply.entity_id(), list.entity_id);

        let locator = ReplyLocator::for_reply(&reply, 7);
        assert_eq!(locator.parent_entity, list.entity_id);
        assert_eq!(locator.position, reply.position);
    }
}
