use std::fmt::Display;

use crate::datasets::movie_review_sentiment;

/// Long-form alias for the Movie Review dataset
pub static MOVIE_REVIEW_SENTIMENT: &str = "movie-review-sentiment";

/// The Dataset enum
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Dataset {
    /// Movie Review sentiment dataset
    MovieReviewSentiment,
}

impl TryFrom<&str> for Dataset {
    type Error = DatasetError;

    /// Try to convert a string to a Dataset
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let name = value.to_lowercase();

        if name == movie_review_sentiment::DATASET || name == MOVIE_REVIEW_SENTIMENT {
            Ok(Dataset::MovieReviewSentiment)
        } else {
            Err(Self::Error::Unknown(value.to_string()))
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dataset::MovieReviewSentiment => movie_review_sentiment::DATASET,
        };

        write!(f, "{}", name)
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No dataset found for the given string
    #[error("no dataset found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_dataset_names() {
        assert_eq!(Dataset::try_from("mr").unwrap(), Dataset::MovieReviewSentiment);
        assert_eq!(
            Dataset::try_from("Movie-Review-Sentiment").unwrap(),
            Dataset::MovieReviewSentiment
        );
        assert_eq!(Dataset::MovieReviewSentiment.to_string(), "mr");
        assert!(matches!(
            Dataset::try_from("snips"),
            Err(DatasetError::Unknown(name)) if name == "snips"
        ));
    }
}
