use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of one match, assembled by the text parser and consumed by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Match clock as `M:SS`
    pub clock: String,
    pub ally_kills: u32,
    pub enemy_kills: u32,
    pub ally_gold: u32,
    pub enemy_gold: u32,
    pub heroes: Vec<Hero>,
    pub towers: Vec<Tower>,
    pub minion_waves: Vec<MinionWave>,
    pub objectives: Vec<NeutralObjective>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            clock: "00:00".to_string(),
            ally_kills: 0,
            enemy_kills: 0,
            ally_gold: 0,
            enemy_gold: 0,
            heroes: Vec::new(),
            towers: Vec::new(),
            minion_waves: Vec::new(),
            objectives: Vec::new(),
        }
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heroes_on(&self, side: Side) -> impl Iterator<Item = &Hero> {
        self.heroes.iter().filter(move |h| h.side == side)
    }

    pub fn kills(&self, side: Side) -> u32 {
        match side {
            Side::Ally => self.ally_kills,
            Side::Enemy => self.enemy_kills,
        }
    }

    pub fn gold(&self, side: Side) -> u32 {
        match side {
            Side::Ally => self.ally_gold,
            Side::Enemy => self.enemy_gold,
        }
    }
}

/// One of the two teams, relative to the report's subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Point in the game's logical coordinate space (roughly -60..60 on each axis)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub player: String,
    pub side: Side,
    /// Lane role label as written in the source, may be empty
    pub role: String,
    pub level: u32,
    /// Fraction in `0.0..=1.0`. Dead heroes always hold 0.0; an alive hero keeps whatever
    /// the report says, so `alive` with 0.0 is possible when the source reports `（0%）`.
    pub hp: f64,
    pub mana: f64,
    pub alive: bool,
    /// Seconds until respawn; only set for dead heroes
    pub respawn_secs: Option<u32>,
    pub position: Option<Position>,
    /// Kills, deaths, assists
    pub kda: (u32, u32, u32),
    pub gold: u32,
    pub items: Vec<String>,
    pub has_ultimate: bool,
    pub buffs: Vec<String>,
    pub visible: bool,
}

impl Hero {
    pub fn new(name: impl Into<String>, player: impl Into<String>, side: Side) -> Self {
        Self {
            name: name.into(),
            player: player.into(),
            side,
            role: String::new(),
            level: 1,
            hp: 1.0,
            mana: 1.0,
            alive: true,
            respawn_secs: None,
            position: None,
            kda: (0, 0, 0),
            gold: 0,
            items: Vec::new(),
            has_ultimate: true,
            buffs: Vec::new(),
            visible: true,
        }
    }

    /// Whether this hero is the player the report is written for
    pub fn is_subject(&self) -> bool {
        self.player.contains("玩家")
    }

    pub fn kills(&self) -> u32 {
        self.kda.0
    }

    pub fn deaths(&self) -> u32 {
        self.kda.1
    }

    pub fn assists(&self) -> u32 {
        self.kda.2
    }
}

/// Tower tiers per lane, ordered from the outside in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerTier {
    Outer,
    Inner,
    Final,
}

impl TowerTier {
    pub const ALL: [TowerTier; 3] = [TowerTier::Outer, TowerTier::Inner, TowerTier::Final];

    /// Label used in the source text
    pub fn label(self) -> &'static str {
        match self {
            TowerTier::Outer => "一塔",
            TowerTier::Inner => "二塔",
            TowerTier::Final => "高地塔",
        }
    }

    /// First tier whose label occurs in `text`, checked outer to final
    pub fn find_in(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| text.contains(t.label()))
    }
}

impl fmt::Display for TowerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub side: Side,
    pub lane: String,
    pub tier: TowerTier,
    pub hp: f64,
    pub position: Position,
    pub destroyed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveKind {
    Normal,
    Siege,
    Vanguard,
    Other(String),
}

impl WaveKind {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.contains("先锋") {
            WaveKind::Vanguard
        } else if label.contains("炮车") {
            WaveKind::Siege
        } else if label.contains("普通") || label == "小兵" {
            WaveKind::Normal
        } else {
            WaveKind::Other(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            WaveKind::Normal => "普通小兵",
            WaveKind::Siege => "炮车",
            WaveKind::Vanguard => "主宰先锋",
            WaveKind::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinionWave {
    /// The attacking side that owns the wave
    pub side: Side,
    pub lane: String,
    pub position: Position,
    pub count: u32,
    pub hp: f64,
    pub kind: WaveKind,
}

/// The seven neutral objective slots on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveKind {
    AllyBlueBuff,
    AllyRedBuff,
    Overlord,
    StormDragon,
    Tyrant,
    EnemyRedBuff,
    EnemyBlueBuff,
}

impl ObjectiveKind {
    /// Left-to-right order of the bottom strip
    pub const STRIP_ORDER: [ObjectiveKind; 7] = [
        ObjectiveKind::AllyBlueBuff,
        ObjectiveKind::AllyRedBuff,
        ObjectiveKind::Overlord,
        ObjectiveKind::StormDragon,
        ObjectiveKind::Tyrant,
        ObjectiveKind::EnemyRedBuff,
        ObjectiveKind::EnemyBlueBuff,
    ];

    /// Order in which names are tried against a source segment; first hit wins
    pub const MATCH_ORDER: [ObjectiveKind; 7] = [
        ObjectiveKind::Overlord,
        ObjectiveKind::Tyrant,
        ObjectiveKind::StormDragon,
        ObjectiveKind::AllyBlueBuff,
        ObjectiveKind::EnemyBlueBuff,
        ObjectiveKind::AllyRedBuff,
        ObjectiveKind::EnemyRedBuff,
    ];

    /// Canonical name as written in the source text
    pub fn name(self) -> &'static str {
        match self {
            ObjectiveKind::AllyBlueBuff => "我方蓝buff",
            ObjectiveKind::AllyRedBuff => "我方红buff",
            ObjectiveKind::Overlord => "主宰",
            ObjectiveKind::StormDragon => "风暴龙王",
            ObjectiveKind::Tyrant => "暴君",
            ObjectiveKind::EnemyRedBuff => "敌方红buff",
            ObjectiveKind::EnemyBlueBuff => "敌方蓝buff",
        }
    }

    /// Short display title for the bottom strip
    pub fn title(self) -> &'static str {
        match self {
            ObjectiveKind::AllyBlueBuff | ObjectiveKind::EnemyBlueBuff => "蓝Buff",
            ObjectiveKind::AllyRedBuff | ObjectiveKind::EnemyRedBuff => "红Buff",
            ObjectiveKind::Overlord => "主宰",
            ObjectiveKind::StormDragon => "风暴龙王",
            ObjectiveKind::Tyrant => "暴君",
        }
    }

    /// Single-glyph map label
    pub fn glyph(self) -> &'static str {
        match self {
            ObjectiveKind::AllyBlueBuff | ObjectiveKind::EnemyBlueBuff => "蓝",
            ObjectiveKind::AllyRedBuff | ObjectiveKind::EnemyRedBuff => "红",
            ObjectiveKind::Overlord => "主",
            ObjectiveKind::StormDragon => "龙",
            ObjectiveKind::Tyrant => "暴",
        }
    }

    pub fn find_in(text: &str) -> Option<Self> {
        Self::MATCH_ORDER.into_iter().find(|k| text.contains(k.name()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralObjective {
    pub kind: ObjectiveKind,
    /// Sentinel origin when the source gave no coordinates
    pub position: Position,
    /// False when `position` is the sentinel
    pub located: bool,
    pub hp: f64,
    pub exists: bool,
    pub respawn_secs: Option<u32>,
    /// Source segment, kept for the status line
    pub description: String,
}

impl NeutralObjective {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}
