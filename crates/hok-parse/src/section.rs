//! Splits report text into bracket-named sections.

/// Hero-listing sections; all share the same line grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroRoster {
    Player,
    Allies,
    VisibleEnemies,
    HiddenEnemies,
    Fallen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// 整体情况: match clock
    Overview,
    /// 总体态势: kill and gold totals
    Totals,
    Heroes(HeroRoster),
    /// 防御塔与兵线状态
    Structures,
    /// 野怪状态
    Objectives,
    /// 地图信息: static tower coordinates
    MapInfo,
    Other(String),
}

impl Section {
    pub fn from_name(name: &str) -> Self {
        match name {
            "整体情况" => Section::Overview,
            "总体态势" => Section::Totals,
            "玩家情况" => Section::Heroes(HeroRoster::Player),
            "我方英雄状态" => Section::Heroes(HeroRoster::Allies),
            "视野可见的敌方英雄" => Section::Heroes(HeroRoster::VisibleEnemies),
            "视野不可见的敌方英雄" => Section::Heroes(HeroRoster::HiddenEnemies),
            "阵亡英雄" => Section::Heroes(HeroRoster::Fallen),
            "防御塔与兵线状态" => Section::Structures,
            "野怪状态" => Section::Objectives,
            "地图信息" => Section::MapInfo,
            other => Section::Other(other.to_string()),
        }
    }
}

/// Classification of a single trimmed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken<'a> {
    Blank,
    /// `[name]`, optionally followed by content on the same line
    Header { name: &'a str, rest: &'a str },
    /// Starts with `[` but is not a well-formed header
    Reset,
    Content(&'a str),
}

impl<'a> LineToken<'a> {
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return LineToken::Blank;
        }
        let Some(inner) = line.strip_prefix('[') else {
            return LineToken::Content(line);
        };
        match inner.split_once(']') {
            Some((name, rest)) if !name.trim().is_empty() => LineToken::Header {
                name: name.trim(),
                rest: rest.trim(),
            },
            _ => LineToken::Reset,
        }
    }
}

/// A content line together with the section it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLine<'a> {
    pub section: Option<Section>,
    pub text: &'a str,
}

/// Walks the text line by line, yielding content lines tagged with the active section
pub struct SectionReader<'a> {
    lines: std::str::Lines<'a>,
    current: Option<Section>,
}

impl<'a> SectionReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            current: None,
        }
    }
}

impl<'a> Iterator for SectionReader<'a> {
    type Item = SectionLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            match LineToken::classify(line) {
                LineToken::Blank => continue,
                LineToken::Reset => self.current = None,
                LineToken::Header { name, rest } => {
                    self.current = Some(Section::from_name(name));
                    if !rest.is_empty() {
                        return Some(SectionLine {
                            section: self.current.clone(),
                            text: rest,
                        });
                    }
                }
                LineToken::Content(text) => {
                    return Some(SectionLine {
                        section: self.current.clone(),
                        text,
                    });
                }
            }
        }
        None
    }
}
