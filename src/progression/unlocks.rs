//! In-run room unlocks
//!
//! Library, armory and alchemy rooms stay out of the generation pool until
//! bought with Currency B during a run.

use std::collections::BTreeSet;

use crate::world::RoomType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnlockError {
    #[error("{0:?} rooms cannot be unlocked")]
    NotUnlockable(RoomType),
    #[error("{0:?} rooms are already unlocked")]
    AlreadyUnlocked(RoomType),
    #[error("unlocking {room_type:?} costs {needed}, have {available}")]
    InsufficientCurrency { room_type: RoomType, needed: u64, available: u64 },
}

/// Room types that can still be bought
pub fn available_unlocks(unlocked: &BTreeSet<RoomType>) -> Vec<(RoomType, u64)> {
    RoomType::ALL
        .iter()
        .filter(|t| !unlocked.contains(t))
        .filter_map(|t| t.unlock_cost().map(|cost| (*t, cost)))
        .collect()
}

/// Unlock a room type, paying from Currency B. Returns the price paid.
pub fn unlock_room_type(
    unlocked: &mut BTreeSet<RoomType>,
    currency_b: &mut u64,
    room_type: RoomType,
) -> Result<u64, UnlockError> {
    let cost = room_type.unlock_cost().ok_or(UnlockError::NotUnlockable(room_type))?;
    if unlocked.contains(&room_type) {
        return Err(UnlockError::AlreadyUnlocked(room_type));
    }
    if *currency_b < cost {
        return Err(UnlockError::InsufficientCurrency { room_type, needed: cost, available: *currency_b });
    }

    *currency_b -= cost;
    unlocked.insert(room_type);
    log::info!("Unlocked {} for {} Currency B", room_type.name(), cost);
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_library() {
        let mut unlocked: BTreeSet<RoomType> = RoomType::DEFAULT_UNLOCKED.into_iter().collect();
        let mut currency = 80;
        assert_eq!(available_unlocks(&unlocked).len(), 3);

        assert_eq!(unlock_room_type(&mut unlocked, &mut currency, RoomType::Library), Ok(50));
        assert_eq!(currency, 30);
        assert!(unlocked.contains(&RoomType::Library));
        assert_eq!(
            unlock_room_type(&mut unlocked, &mut currency, RoomType::Library),
            Err(UnlockError::AlreadyUnlocked(RoomType::Library))
        );
    }

    #[test]
    fn test_failed_unlock_changes_nothing() {
        let mut unlocked = BTreeSet::new();
        let mut currency = 74;
        assert!(unlock_room_type(&mut unlocked, &mut currency, RoomType::Armory).is_err());
        assert_eq!(
            unlock_room_type(&mut unlocked, &mut currency, RoomType::Combat),
            Err(UnlockError::NotUnlockable(RoomType::Combat))
        );
        assert_eq!(currency, 74);
        assert!(unlocked.is_empty());
    }
}
