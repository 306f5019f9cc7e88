use crate::scene::Rgba;
use hok_state::{ObjectiveKind, Side};

pub const CANVAS: Rgba = Rgba::hex(0x1e1e1e);
pub const WHITE: Rgba = Rgba::hex(0xffffff);
pub const BLACK: Rgba = Rgba::hex(0x000000);

pub const MAP_FLOOR: Rgba = Rgba::hex(0x0b0f19);
pub const MAP_BORDER: Rgba = Rgba::hex(0x333333);
pub const RIVER: Rgba = Rgba::hex(0x1c2b3d);
pub const LANE: Rgba = Rgba::hex(0x2a2a2a);

pub const ALLY_TOWER: Rgba = Rgba::hex(0x1d4ed8);
pub const ENEMY_TOWER: Rgba = Rgba::hex(0xb91c1c);
pub const ALLY_MINION: Rgba = Rgba::hex(0x2563eb);
pub const ENEMY_MINION: Rgba = Rgba::hex(0xdc2626);

pub const HP: Rgba = Rgba::hex(0x16a34a);
pub const MANA: Rgba = Rgba::hex(0x2563eb);
pub const BAR_TRACK: Rgba = Rgba::hex(0x333333);
pub const SUBJECT: Rgba = Rgba::hex(0x22c55e);
pub const PLACEHOLDER: Rgba = Rgba::hex(0x6b7280);
pub const SLOT: Rgba = Rgba::hex(0x3a3a3a);
pub const SHROUD: Rgba = Rgba::hex(0x000000).with_alpha(128);

pub const PANEL: Rgba = Rgba::hex(0x2d2d2d);
pub const PANEL_BORDER: Rgba = Rgba::hex(0x444444);
pub const LABEL: Rgba = Rgba::hex(0xcccccc);
pub const LABEL_DIM: Rgba = Rgba::hex(0xaaaaaa);
pub const ULT_READY: Rgba = Rgba::hex(0x16a34a);
pub const ULT_SPENT: Rgba = Rgba::hex(0x555555);

pub const GOLD: Rgba = Rgba::hex(0xfbbf24);
pub const FALLEN: Rgba = Rgba::hex(0x9ca3af);
pub const ABSENT: Rgba = Rgba::hex(0x555555);
pub const UNKNOWN_RING: Rgba = Rgba::hex(0x444444);
pub const CONNECTOR: Rgba = Rgba::hex(0x888888);

pub const BLUE_BUFF: Rgba = Rgba::hex(0x3b82f6);
pub const RED_BUFF: Rgba = Rgba::hex(0xef4444);
pub const TYRANT: Rgba = Rgba::hex(0xeab308);
pub const STORM_DRAGON: Rgba = Rgba::hex(0xf59e0b);
pub const OVERLORD: Rgba = Rgba::hex(0xa855f7);

pub fn tower(side: Side) -> Rgba {
    match side {
        Side::Ally => ALLY_TOWER,
        Side::Enemy => ENEMY_TOWER,
    }
}

pub fn minion(side: Side) -> Rgba {
    match side {
        Side::Ally => ALLY_MINION,
        Side::Enemy => ENEMY_MINION,
    }
}

/// Marker colour on the mini-map
pub fn objective(kind: ObjectiveKind) -> Rgba {
    match kind {
        ObjectiveKind::Overlord => OVERLORD,
        ObjectiveKind::Tyrant => TYRANT,
        ObjectiveKind::StormDragon => STORM_DRAGON,
        ObjectiveKind::AllyBlueBuff | ObjectiveKind::EnemyBlueBuff => BLUE_BUFF,
        ObjectiveKind::AllyRedBuff | ObjectiveKind::EnemyRedBuff => RED_BUFF,
    }
}

/// Badge colour in the bottom status strip
pub fn objective_badge(kind: ObjectiveKind) -> Rgba {
    match kind {
        ObjectiveKind::AllyBlueBuff | ObjectiveKind::EnemyBlueBuff => ALLY_MINION,
        ObjectiveKind::AllyRedBuff | ObjectiveKind::EnemyRedBuff => ENEMY_MINION,
        other => objective(other),
    }
}

/// Short marker and colour for a buff held by a hero
pub fn buff(name: &str) -> (&'static str, Rgba) {
    if name.contains('蓝') {
        ("蓝", BLUE_BUFF)
    } else if name.contains('红') {
        ("红", RED_BUFF)
    } else if name.contains("暴君") {
        ("暴", TYRANT)
    } else if name.contains("风暴") || name.contains('龙') {
        ("龙", STORM_DRAGON)
    } else {
        ("?", WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buff_markers() {
        assert_eq!(buff("蓝buff"), ("蓝", BLUE_BUFF));
        assert_eq!(buff("红buff"), ("红", RED_BUFF));
        assert_eq!(buff("暴君"), ("暴", TYRANT));
        assert_eq!(buff("风暴龙王"), ("龙", STORM_DRAGON));
        assert_eq!(buff("未知"), ("?", WHITE));
    }

    #[test]
    fn test_badges_differ_from_map_markers_for_buffs() {
        assert_eq!(objective(ObjectiveKind::AllyBlueBuff), BLUE_BUFF);
        assert_eq!(objective_badge(ObjectiveKind::AllyBlueBuff), ALLY_MINION);
        assert_eq!(objective_badge(ObjectiveKind::Overlord), OVERLORD);
    }
}
