//! The Movie Review ("MR") dataset: sentence-level sentiment classification of positive and
//! negative movie reviews (Pang and Lee, 2005).

use std::{collections::HashMap, fmt::Display};

use async_trait::async_trait;
use burn::data::dataset::{self, Dataset as _, DatasetIterator, InMemDataset};
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};

use crate::{
    utils::{
        classes::{id2label, invert_map},
        download::{Fetch, HttpFetcher},
    },
    Config,
};

use super::{fetch_and_parse, DatasetError, LoadableDataset};

/// The name of the Movie Review dataset
pub static DATASET: &str = "mr";

/// Sentiment class of a review, serialized as its numeric class id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum Sentiment {
    /// Label 0
    Negative = 0,

    /// Label 1
    Positive = 1,
}

impl Sentiment {
    /// Class names ordered by class id
    pub const LABELS: [&'static str; 2] = ["Negative", "Positive"];

    /// The numeric class id
    pub fn id(self) -> u8 {
        self as u8
    }

    /// A mapping from class ids to class names
    pub fn id2label() -> HashMap<usize, String> {
        id2label(&Self::LABELS)
    }

    /// A mapping from class names to class ids
    pub fn label2id() -> HashMap<String, usize> {
        invert_map(Self::id2label())
    }
}

impl TryFrom<i64> for Sentiment {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Sentiment::Negative),
            1 => Ok(Sentiment::Positive),
            _ => Err(value),
        }
    }
}

impl From<Sentiment> for u8 {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.id()
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::LABELS[self.id() as usize])
    }
}

/// A Movie Review example
pub type Item = super::Sample<Sentiment>;

/// Struct for the Movie Review dataset
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the Movie Review dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    async fn load(config: &Config, offset: usize) -> Result<Self, DatasetError> {
        Dataset::load(config, offset).await
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = Item;
    type IntoIter = DatasetIterator<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Implement methods for constructing the Movie Review dataset
impl Dataset {
    /// Loads the dataset starting at line `offset`, downloading the file first if it is missing
    pub async fn load(config: &Config, offset: usize) -> Result<Self, DatasetError> {
        Self::load_with(&HttpFetcher::new(), config, offset).await
    }

    /// Loads the whole dataset
    pub async fn load_full(config: &Config) -> Result<Self, DatasetError> {
        Self::load(config, 0).await
    }

    /// Loads the dataset using the given fetcher for the download step
    pub async fn load_with<F>(fetcher: &F, config: &Config, offset: usize) -> Result<Self, DatasetError>
    where
        F: Fetch + ?Sized,
    {
        let items: Vec<Item> =
            fetch_and_parse(fetcher, config, &config.movie_review_path, offset).await?;

        Ok(Self::from_items(items))
    }

    /// Wraps already parsed items
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            dataset: InMemDataset::new(items),
        }
    }

    /// Returns every example as a `(text, label)` pair, in file order
    pub fn pairs(&self) -> Vec<(String, u8)> {
        self.iter()
            .map(|item| (item.text, item.label.id()))
            .collect()
    }

    /// Returns up to `count` distinct random samples from the dataset
    pub fn get_samples(&self, count: usize) -> Vec<(String, Sentiment)> {
        let mut rng = rand::thread_rng();
        let count = count.min(self.len());

        sample(&mut rng, self.len(), count)
            .into_iter()
            .filter_map(|i| self.get(i))
            .map(|item| (item.text, item.label))
            .collect()
    }
}
