use anchor_lang::prelude::*;

#[error_code]
pub enum PlazaError {
    #[msg("Profile already exists for this owner")]
    AlreadyExists,

    #[msg("Profile required: the acting identity has no profile")]
    ProfileRequired,

    #[msg("Invalid address: zero address or self-reference")]
    InvalidAddress,

    #[msg("Not authorized: signer does not act for this identity")]
    NotAuthorized,

    #[msg("Content cannot be empty")]
    ContentEmpty,

    #[msg("Content exceeds the maximum length")]
    ContentTooLong,

    #[msg("Reply has already been deleted")]
    ReplyAlreadyDeleted,

    #[msg("Invalid vote type: must be 1 (up) or 2 (down)")]
    InvalidVoteType,

    #[msg("Identity already cast this vote on this entity")]
    DuplicateVote,

    #[msg("Index out of bounds")]
    IndexOutOfBounds,

    #[msg("Display name cannot be empty")]
    NameEmpty,

    #[msg("Display name exceeds the maximum length")]
    NameTooLong,

    #[msg("Bio exceeds the maximum length")]
    BioTooLong,

    #[msg("Profile already has the maximum number of links")]
    TooManyLinks,

    #[msg("Link name and url must be non-empty and within length limits")]
    LinkInvalid,

    #[msg("Unknown content type tag")]
    InvalidContentType,

    #[msg("Entity id does not match (contract, content type, index)")]
    EntityIdMismatch,

    #[msg("Parent reply does not belong to this entity")]
    InvalidParentReply,

    #[msg("Reply nesting exceeds the maximum depth")]
    ReplyTooDeep,

    #[msg("Counter overflow")]
    ArithmeticOverflow,
}

#[cfg(test)]
pub(crate) fn assert_plaza_error<T: std::fmt::Debug>(result: Result<T>, expected: PlazaError) {
    let name = format!("{:?}", expected);
    let code = anchor_lang::error::ERROR_CODE_OFFSET + expected as u32;
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => {
            assert_eq!(err.error_code_number, code, "expected {}, got {}", name, err.error_name)
        }
        other => panic!("expected {}, got {:?}", name, other),
    }
}
