// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Pre-filled issue links. Contributions are never written anywhere by this
//! program: each one is an `issues/new` URL a maintainer handles by hand.

use anyhow::{Context, Result, bail};
use url::Url;

use crate::{Item, NewItemDraft};

pub const DEFAULT_TRACKER_HOST: &str = "github.com";
pub const DEFAULT_TRACKER_OWNER: &str = "Prufrock94";
pub const DEFAULT_TRACKER_REPO: &str = "HortiRobotCatalog";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTracker {
    new_issue_url: Url,
}

impl IssueTracker {
    pub fn new(host: &str, owner: &str, repo: &str) -> Result<Self> {
        let host = host.trim().trim_end_matches('/');
        let owner = owner.trim();
        let repo = repo.trim();
        for (name, value) in [("host", host), ("owner", owner), ("repo", repo)] {
            if value.is_empty() {
                bail!("tracker.{name} must not be empty");
            }
        }
        for (name, value) in [("owner", owner), ("repo", repo)] {
            if value.contains('/') {
                bail!("tracker.{name} {value:?} must be a single path segment");
            }
        }

        let raw = format!("https://{host}/{owner}/{repo}/issues/new");
        let new_issue_url =
            Url::parse(&raw).with_context(|| format!("invalid issue tracker url {raw:?}"))?;
        Ok(Self { new_issue_url })
    }

    pub fn github_default() -> Result<Self> {
        Self::new(
            DEFAULT_TRACKER_HOST,
            DEFAULT_TRACKER_OWNER,
            DEFAULT_TRACKER_REPO,
        )
    }

    pub fn new_issue_url(&self) -> &Url {
        &self.new_issue_url
    }

    fn issue_link(&self, title: &str, body: &str, label: &str) -> Url {
        let mut url = self.new_issue_url.clone();
        url.query_pairs_mut()
            .append_pair("title", title)
            .append_pair("body", body)
            .append_pair("labels", label);
        url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContributionKind {
    Edit,
    PriceUpdate,
    AddVideo,
    AddArticle,
    AddRemark,
    NewItem,
}

impl ContributionKind {
    /// Kinds offered from an existing item's detail panel.
    pub const FOR_ITEM: [Self; 5] = [
        Self::Edit,
        Self::PriceUpdate,
        Self::AddVideo,
        Self::AddArticle,
        Self::AddRemark,
    ];

    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Edit => "✏️ Robot aanpassen",
            Self::PriceUpdate => "💰 Prijsupdate",
            Self::AddVideo => "🎥 Video toevoegen",
            Self::AddArticle => "📄 Artikel toevoegen",
            Self::AddRemark => "💬 Opmerking",
            Self::NewItem => "➕ Nieuwe robot",
        }
    }

    pub const fn issue_label(self) -> &'static str {
        match self {
            Self::Edit => "aanpassing",
            Self::PriceUpdate => "prijsupdate",
            Self::AddVideo => "video",
            Self::AddArticle => "artikel",
            Self::AddRemark => "opmerking",
            Self::NewItem => "nieuwe-robot",
        }
    }

    pub fn title(self, robot: &str) -> String {
        match self {
            Self::Edit => format!("Aanpassing {robot}"),
            Self::PriceUpdate => format!("Prijsupdate {robot}"),
            Self::AddVideo => format!("Video voor {robot}"),
            Self::AddArticle => format!("Artikel voor {robot}"),
            Self::AddRemark => format!("Opmerking bij {robot}"),
            Self::NewItem => format!("Nieuwe robot: {robot}"),
        }
    }

    const fn prompt(self) -> &'static str {
        match self {
            Self::Edit => "Beschrijf welke gegevens aangepast moeten worden:\n\n",
            Self::PriceUpdate => "Nieuwe prijs:\nBron van de prijs:\n",
            Self::AddVideo => "Link naar de video:\nKorte omschrijving:\n",
            Self::AddArticle => "Link naar het artikel:\nKorte omschrijving:\n",
            Self::AddRemark => "Opmerking:\n\n",
            Self::NewItem => "Voorstel om deze robot aan de catalogus toe te voegen.\n",
        }
    }

    const fn snapshot_heading(self) -> &'static str {
        match self {
            Self::NewItem => "Voorgestelde gegevens",
            _ => "Huidige gegevens",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionLink {
    pub kind: ContributionKind,
    pub url: Url,
}

impl ContributionLink {
    pub fn label(&self) -> &'static str {
        self.kind.button_label()
    }
}

/// Edit, price, video, article and remark links for one item.
pub fn contribution_links(tracker: &IssueTracker, item: &Item) -> Vec<ContributionLink> {
    ContributionKind::FOR_ITEM
        .into_iter()
        .map(|kind| contribution_link(tracker, kind, item))
        .collect()
}

pub fn contribution_link(
    tracker: &IssueTracker,
    kind: ContributionKind,
    item: &Item,
) -> ContributionLink {
    let title = kind.title(item.display_name());
    let body = issue_body(kind, item);
    ContributionLink {
        kind,
        url: tracker.issue_link(&title, &body, kind.issue_label()),
    }
}

/// Proposal link for a robot that is not in the catalog yet.
pub fn new_item_link(tracker: &IssueTracker, draft: &NewItemDraft) -> Result<ContributionLink> {
    draft.validate()?;
    Ok(contribution_link(
        tracker,
        ContributionKind::NewItem,
        &draft.to_item(),
    ))
}

pub fn issue_body(kind: ContributionKind, item: &Item) -> String {
    format!(
        "{}\n### {}\n\n{}\n",
        kind.prompt(),
        kind.snapshot_heading(),
        fenced_snapshot(item)
    )
}

/// Item JSON inside a code fence that is longer than any backtick run in the
/// JSON, so field values cannot terminate the block.
pub fn fenced_snapshot(item: &Item) -> String {
    let snapshot = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_owned());
    let fence = "`".repeat(longest_backtick_run(&snapshot).max(2) + 1);
    format!("{fence}json\n{snapshot}\n{fence}")
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::{
        ContributionKind, IssueTracker, contribution_links, fenced_snapshot, issue_body,
        new_item_link,
    };
    use crate::{Item, NewItemDraft};
    use anyhow::Result;
    use std::collections::HashMap;

    fn robot() -> Item {
        Item {
            brand: "Naïo".to_owned(),
            name: "Oz & Co".to_owned(),
            price: "€10.000 - 12.000".to_owned(),
            ..Item::default()
        }
    }

    fn query(url: &url::Url) -> HashMap<String, String> {
        url.query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    #[test]
    fn item_links_cover_each_kind_with_encoded_title() -> Result<()> {
        let tracker = IssueTracker::github_default()?;
        let links = contribution_links(&tracker, &robot());
        assert_eq!(
            links.iter().map(|link| link.kind).collect::<Vec<_>>(),
            ContributionKind::FOR_ITEM.to_vec()
        );

        let edit = &links[0];
        assert!(
            edit.url
                .as_str()
                .starts_with("https://github.com/Prufrock94/HortiRobotCatalog/issues/new?title=")
        );
        assert!(!edit.url.as_str().contains("Oz & Co"));
        let params = query(&edit.url);
        assert_eq!(params["title"], "Aanpassing Oz & Co");
        assert_eq!(params["labels"], "aanpassing");
        assert!(params["body"].contains("\"robot\": \"Oz & Co\""));
        assert!(params["body"].contains("Huidige gegevens"));
        Ok(())
    }

    #[test]
    fn titles_follow_kind_templates() {
        assert_eq!(ContributionKind::PriceUpdate.title("X"), "Prijsupdate X");
        assert_eq!(ContributionKind::AddVideo.title("X"), "Video voor X");
        assert_eq!(ContributionKind::AddArticle.title("X"), "Artikel voor X");
        assert_eq!(ContributionKind::AddRemark.title("X"), "Opmerking bij X");
    }

    #[test]
    fn nameless_item_still_gets_a_title() -> Result<()> {
        let tracker = IssueTracker::github_default()?;
        let links = contribution_links(&tracker, &Item::default());
        assert_eq!(query(&links[1].url)["title"], "Prijsupdate (naamloos)");
        Ok(())
    }

    #[test]
    fn snapshot_fence_outgrows_backticks_in_values() {
        let item = Item {
            remarks: Some("zie ```code``` en ````meer````".to_owned()),
            ..robot()
        };
        let fenced = fenced_snapshot(&item);
        assert!(fenced.starts_with("`````json\n"));
        assert!(fenced.ends_with("\n`````"));

        let plain = fenced_snapshot(&robot());
        assert!(plain.starts_with("```json\n"));
    }

    #[test]
    fn body_embeds_prompt_and_snapshot() {
        let body = issue_body(ContributionKind::PriceUpdate, &robot());
        assert!(body.starts_with("Nieuwe prijs:"));
        assert!(body.contains("\"kostprijs\": \"€10.000 - 12.000\""));
    }

    #[test]
    fn new_item_link_validates_draft() -> Result<()> {
        let tracker = IssueTracker::github_default()?;
        let error = new_item_link(&tracker, &NewItemDraft::default())
            .expect_err("empty draft should fail");
        assert!(error.to_string().contains("robot name is required"));

        let link = new_item_link(&tracker, &NewItemDraft {
            brand: "Ecorobotix".to_owned(),
            name: "ARA".to_owned(),
            ..NewItemDraft::default()
        })?;
        let params = query(&link.url);
        assert_eq!(params["title"], "Nieuwe robot: ARA");
        assert_eq!(params["labels"], "nieuwe-robot");
        assert!(params["body"].contains("Voorgestelde gegevens"));
        Ok(())
    }

    #[test]
    fn tracker_rejects_blank_and_nested_segments() {
        assert!(IssueTracker::new("", "o", "r").is_err());
        assert!(IssueTracker::new("github.com", "a/b", "r").is_err());
        let error = IssueTracker::new("github.com", "o", " ").expect_err("blank repo");
        assert!(error.to_string().contains("tracker.repo"));
    }

    #[test]
    fn tracker_supports_custom_hosts() -> Result<()> {
        let tracker = IssueTracker::new("git.example.test/", "team", "catalog")?;
        assert_eq!(
            tracker.new_issue_url().as_str(),
            "https://git.example.test/team/catalog/issues/new"
        );
        Ok(())
    }
}
