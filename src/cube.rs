use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::time_entry::TimeEntry;

/// client, project, 日付の組み合わせごとの集計結果。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CubeLeaf {
    total_duration_ms: i64,
    descriptions: Vec<String>,
}

impl CubeLeaf {
    fn add(&mut self, entry: &TimeEntry) {
        self.total_duration_ms += entry.duration_ms;
        self.descriptions.push(entry.description.clone());
    }

    /// 合計時間(ミリ秒)。
    pub fn total_duration_ms(&self) -> i64 {
        self.total_duration_ms
    }

    /// 追加された順の説明。重複を含む。
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// 重複を取り除いた説明。最初に現れた順を保つ。
    pub fn unique_descriptions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.descriptions
            .iter()
            .map(String::as_str)
            .filter(|description| seen.insert(*description))
            .collect()
    }
}

/// 1つのprojectに属する日毎の集計結果。
pub type DayMap = BTreeMap<NaiveDate, CubeLeaf>;

/// client, projectの組と、その日毎の集計結果。
#[derive(Clone, Copy, Debug)]
pub struct ProjectGroup<'a> {
    pub client: &'a str,
    pub project: &'a str,
    pub days: &'a DayMap,
}

/// 集計結果1件を特定するキー。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafKey<'a> {
    pub client: &'a str,
    pub project: &'a str,
    pub day: NaiveDate,
}

/// タイムエントリーをclient → project → 日付の3階層で集計したもの。
///
/// どの階層もキーの昇順で走査される。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cube {
    clients: BTreeMap<String, BTreeMap<String, DayMap>>,
}

impl Cube {
    /// タイムエントリーを集計する。
    ///
    /// 各エントリーは開始日の集計結果1件にだけ加算される。
    ///
    /// # Arguments
    ///
    /// * `time_entries` - 集計するタイムエントリー
    pub fn build(time_entries: &[TimeEntry]) -> Self {
        let clients = time_entries.iter().fold(
            BTreeMap::<String, BTreeMap<String, DayMap>>::new(),
            |mut acc, entry| {
                acc.entry(entry.client.clone())
                    .or_default()
                    .entry(entry.project.clone())
                    .or_default()
                    .entry(entry.day)
                    .or_default()
                    .add(entry);
                acc
            },
        );

        Self { clients }
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// clientの一覧を昇順で返す。
    pub fn clients(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }

    /// client, projectの組を昇順で返す。
    pub fn projects(&self) -> impl Iterator<Item = ProjectGroup<'_>> {
        self.clients.iter().flat_map(|(client, projects)| {
            projects.iter().map(move |(project, days)| ProjectGroup {
                client: client.as_str(),
                project: project.as_str(),
                days,
            })
        })
    }

    /// すべての集計結果を(client, project, 日付)の昇順で返す。
    pub fn leaves(&self) -> impl Iterator<Item = (LeafKey<'_>, &CubeLeaf)> {
        self.projects().flat_map(|group| {
            group.days.iter().map(move |(day, leaf)| {
                (
                    LeafKey {
                        client: group.client,
                        project: group.project,
                        day: *day,
                    },
                    leaf,
                )
            })
        })
    }

    /// すべての集計結果の合計時間(ミリ秒)。
    pub fn total_duration_ms(&self) -> i64 {
        self.leaves().map(|(_, leaf)| leaf.total_duration_ms()).sum()
    }
}
