//! Keeps films the user can actually stream.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::Film;
use signals::UserContext;

/// Keeps films offered by at least one of the user's services.
///
/// A user with no subscriptions recorded is not restricted; every film
/// passes.
pub struct StreamingServiceFilter;

impl Filter for StreamingServiceFilter {
    fn name(&self) -> &str {
        "StreamingServiceFilter"
    }

    fn apply<'a>(&self, films: Vec<&'a Film>, context: &UserContext) -> Result<Vec<&'a Film>> {
        if context.subscribed_services.is_empty() {
            return Ok(films);
        }
        Ok(films
            .into_iter()
            .filter(|film| {
                film.streaming_services
                    .iter()
                    .any(|service| context.subscribed_services.contains(service))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::film;

    #[test]
    fn test_keeps_only_subscribed() {
        let mut context = UserContext::new(1);
        context.subscribed_services.insert(8);

        let films = [film(1, &[8]), film(2, &[9]), film(3, &[]), film(4, &[9, 8])];
        let kept = StreamingServiceFilter
            .apply(films.iter().collect(), &context)
            .unwrap();

        let ids: Vec<u32> = kept.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_no_subscriptions_keeps_everything() {
        let context = UserContext::new(1);
        let films = [film(1, &[8]), film(2, &[])];

        let kept = StreamingServiceFilter
            .apply(films.iter().collect(), &context)
            .unwrap();
        assert_eq!(kept.len(), 2);
    }
}
