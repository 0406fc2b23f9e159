//! The fixed initial data a new plan is seeded with.

use chrono::NaiveDate;

use crate::model::link::BackgroundLink;
use crate::model::task::{Category, Task};

pub const DEFAULT_PLAN_NAME: &str = "スケーラブル自給自足モデル";

const INITIAL_TASKS: &[(&str, &str, &str, Category, &str)] = &[
    (
        "A-01",
        "2025-07-01",
        "ガチョウの品種、飼育方法、地域の関連法規に関する調査",
        Category::A,
        "計画・準備",
    ),
    (
        "B-01",
        "2025-07-01",
        "RDSの公式ドキュメント（基準書、マニュアル）を精読",
        Category::B,
        "計画・準備",
    ),
    (
        "D-01",
        "2025-07-01",
        "収集すべきデータ項目（給餌量、体重、コスト等）の定義",
        Category::D,
        "計画・準備",
    ),
    (
        "A-02",
        "2025-07-02",
        "雛の入手先、飼料の調達先をリストアップし、連絡する",
        Category::A,
        "計画・準備",
    ),
    (
        "B-02",
        "2025-07-02",
        "RDSの認証機関（CB）をリストアップする",
        Category::B,
        "計画・準備",
    ),
    (
        "D-02",
        "2025-07-02",
        "データ収集用のスプレッドシート（または他のツール）を作成する",
        Category::D,
        "計画・準備",
    ),
    (
        "C-01",
        "2025-07-03",
        "「移動式竹柵」の設計図を作成する",
        Category::C,
        "インフラ構築",
    ),
    (
        "B-03",
        "2025-07-03",
        "認証機関（CB）に連絡し、プロセス、費用、期間について問合せる",
        Category::B,
        "インフラ構築",
    ),
    (
        "D-03",
        "2025-07-03",
        "データ入力の運用ルール（入力タイミング、担当等）を定める",
        Category::D,
        "インフラ構築",
    ),
    (
        "A-03",
        "2025-07-04",
        "飼育場所の選定と、小屋・給水所の最低限の設営",
        Category::A,
        "インフラ構築",
    ),
    (
        "C-02",
        "2025-07-04",
        "竹柵の材料（竹、結束バンド、杭など）をリストアップし、調達する",
        Category::C,
        "インフラ構築",
    ),
    (
        "B-04",
        "2025-07-04",
        "問い合わせ結果を基に、依頼する認証機関を決定する",
        Category::B,
        "インフラ構築",
    ),
    (
        "A-04",
        "2025-07-07",
        "雛を数羽入手し、飼育を開始する",
        Category::A,
        "実行と構築",
    ),
    (
        "C-03",
        "2025-07-07",
        "移動式竹柵のプロトタイプを製作する",
        Category::C,
        "実行と構築",
    ),
    (
        "D-04",
        "2025-07-07",
        "初期の経費や活動記録など、実際のデータ入力を開始する",
        Category::D,
        "実行と構築",
    ),
    (
        "A-05",
        "2025-07-08",
        "雛の初期成長を観察し、日々のオペレーションを確立する",
        Category::A,
        "実行と改善",
    ),
    (
        "C-04",
        "2025-07-08",
        "製作した竹柵を飼育場所でテストし、問題点を洗い出す",
        Category::C,
        "実行と改善",
    ),
    (
        "B-05",
        "2025-07-08",
        "認証機関の要求に基づき、必要な書類準備を開始する",
        Category::B,
        "実行と改善",
    ),
    (
        "A-06",
        "2025-07-09",
        "成長後の加工・解体プロセスを調査し、手順書を作成する",
        Category::A,
        "最終準備",
    ),
    (
        "C-05",
        "2025-07-09",
        "テスト結果を基に、竹柵の設計を改善し、最終版を製作する",
        Category::C,
        "最終準備",
    ),
    (
        "A-07",
        "2025-07-09",
        "加工に必要な道具（ナイフ、作業台等）を準備する",
        Category::A,
        "最終準備",
    ),
];

/// The 21-task initial list
pub fn initial_tasks() -> Vec<Task> {
    INITIAL_TASKS
        .iter()
        .map(|(id, date, content, category, phase)| {
            let date = date
                .parse::<NaiveDate>()
                .unwrap_or_else(|_| panic!("bad seed date for {id}"));
            Task::new(*id, date, *content, *category, *phase)
        })
        .collect()
}

/// The three default background links
pub fn default_links() -> Vec<BackgroundLink> {
    let entries = [
        (
            "link-1",
            "スケーラブル自給自足モデル",
            "https://hackmd.io/@ecdysisxyzbot-ea-001/B1GfA4cNll",
        ),
        (
            "link-2",
            "SSS: Self-sovereign Solarpunk",
            "https://hackmd.io/@ecdysisxyzbot-ea-001/By0-GnXQlg",
        ),
        (
            "link-3",
            "s/acc - 影の加速主義",
            "https://hackmd.io/@ecdysisxyzbot-ea-001/HkgQWQLFQeg",
        ),
    ];
    entries
        .iter()
        .map(|(id, name, url)| BackgroundLink {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_21_tasks_with_unique_ids() {
        let tasks = initial_tasks();
        assert_eq!(tasks.len(), 21);
        let mut ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 21);
    }

    #[test]
    fn test_seed_dates_span_the_plan() {
        let tasks = initial_tasks();
        let first = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
        assert!(tasks.iter().all(|t| t.date >= first && t.date <= last));
        assert_eq!(tasks.iter().filter(|t| t.date == first).count(), 3);
    }

    #[test]
    fn test_default_links_are_navigable() {
        let links = default_links();
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.is_navigable()));
    }
}
