// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use horti_app::{Catalog, Item, Link};
use std::path::PathBuf;

const BRANDS: [&str; 10] = [
    "Naïo Technologies",
    "FarmDroid",
    "Ecorobotix",
    "Kilter",
    "AgXeed",
    "Carbon Robotics",
    "Ågrobot",
    "Earth Rover",
    "Garford",
    "Odd.Bot",
];

const MODEL_PREFIXES: [&str; 8] = [
    "Oz",
    "FD",
    "ARA",
    "AX",
    "Agbot",
    "LaserWeeder",
    "Maverick",
    "Robocrop",
];

const CROPS: [&str; 10] = [
    "sla", "prei", "wortel", "bieten", "spinazie", "ui", "kool", "aardbei", "witlof", "selder",
];

const OPERATIONS: [&str; 6] = ["wieden", "scouten", "zaaien", "oogsten", "spuiten", "schoffelen"];

const STAGES: [&str; 7] = [
    "onderzoek",
    "prototype",
    "start-up",
    "scale-up",
    "commercieel",
    "Commercieel",
    "",
];

const PRICES: [&str; 9] = [
    "€30.000",
    "€90.000 - 110.000",
    "€ 12,5k",
    "op aanvraag",
    "n/a",
    "",
    "€250.000",
    "vanaf €45.000",
    "€5000-6000 per jaar",
];

const REMARKS: [&str; 5] = [
    "Elektrisch aangedreven.",
    "Werkt op zonne-energie.",
    "Nog niet in Nederland verkrijgbaar.",
    "Huur per seizoen mogelijk.",
    "Gebruikt camera's en AI voor onkruidherkenning.",
];

/// The dataset shipped in `data/robots.json`.
pub fn sample_catalog_json() -> &'static str {
    include_str!("../../../data/robots.json")
}

pub fn sample_catalog() -> Result<Catalog> {
    Catalog::from_json(sample_catalog_json()).context("parse bundled sample catalog")
}

/// Writes `contents` to `robots.json` in a fresh temp dir.
pub fn temp_catalog_file(contents: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("robots.json");
    std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn catalog_json(items: &[Item]) -> Result<String> {
    serde_json::to_string_pretty(items).context("serialize catalog fixture")
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible catalog records, including sparse ones.
#[derive(Debug, Clone)]
pub struct RobotFaker {
    rng: DeterministicRng,
}

impl RobotFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn item(&mut self) -> Item {
        let brand = self.pick(&BRANDS);
        let name = format!("{} {}", self.pick(&MODEL_PREFIXES), 10 + self.int_n(90));
        let links = if self.rng.bool() {
            vec![Link {
                label: "Website".to_owned(),
                url: format!(
                    "https://{}.example/",
                    brand.to_lowercase().replace([' ', '.'], "-")
                ),
            }]
        } else {
            Vec::new()
        };

        Item {
            brand: brand.to_owned(),
            name,
            crop_targets: self.tags(&CROPS, 3),
            operations: self.tags(&OPERATIONS, 2),
            development_stage: self.pick(&STAGES).to_owned(),
            price: self.pick(&PRICES).to_owned(),
            photo_url: None,
            links,
            remarks: self.rng.bool().then(|| self.pick(&REMARKS).to_owned()),
        }
    }

    /// A record with most fields left empty.
    pub fn sparse_item(&mut self) -> Item {
        Item {
            name: if self.rng.bool() {
                self.pick(&MODEL_PREFIXES).to_owned()
            } else {
                String::new()
            },
            ..Item::default()
        }
    }

    pub fn catalog(&mut self, len: usize) -> Catalog {
        let items = (0..len)
            .map(|_| {
                if self.int_n(8) == 0 {
                    self.sparse_item()
                } else {
                    self.item()
                }
            })
            .collect();
        Catalog::new(items)
    }

    fn tags(&mut self, pool: &[&str], max: usize) -> Vec<String> {
        let count = self.int_n(max + 1);
        let mut tags = Vec::with_capacity(count);
        for _ in 0..count {
            let tag = self.pick(pool).to_owned();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    fn pick<'a>(&mut self, values: &[&'a str]) -> &'a str {
        values[self.rng.int_n(values.len())]
    }
}
