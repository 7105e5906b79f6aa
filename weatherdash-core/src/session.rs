//! State carried between lookups: the location on screen, the last known
//! position, and the favorites list with its backing store.

use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    WeatherError,
    favorites::{self, Favorite, FavoriteStore},
    location::Locator,
    model::{Coordinates, DisplayWeather, LocationKey, LocationQuery},
    provider::{WeatherProvider, lookup},
};

/// Outcome of refreshing one favorite.
#[derive(Debug)]
pub struct FavoriteReport {
    pub favorite: Favorite,
    pub outcome: Result<DisplayWeather, WeatherError>,
}

#[derive(Debug)]
pub struct Session {
    provider: Box<dyn WeatherProvider>,
    store: Arc<dyn FavoriteStore>,
    favorites: Vec<Favorite>,
    current: Option<LocationKey>,
    last_position: Option<Coordinates>,
}

impl Session {
    /// Start a session, loading favorites from `store`.
    pub fn open(provider: Box<dyn WeatherProvider>, store: Arc<dyn FavoriteStore>) -> Result<Self> {
        let favorites = store.load()?;
        Ok(Self {
            provider,
            store,
            favorites,
            current: None,
            last_position: None,
        })
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn current(&self) -> Option<&LocationKey> {
        self.current.as_ref()
    }

    pub fn last_position(&self) -> Option<Coordinates> {
        self.last_position
    }

    #[instrument(skip(self))]
    pub async fn search(&mut self, city: &str) -> Result<DisplayWeather, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        let weather = lookup(self.provider.as_ref(), &LocationQuery::City(city.to_string())).await?;
        self.current = Some(LocationKey::City(city.to_string()));
        Ok(weather)
    }

    /// Look up weather at the locator's position.
    ///
    /// The position is remembered even when the weather lookup itself fails.
    #[instrument(skip_all)]
    pub async fn locate(&mut self, locator: &dyn Locator) -> Result<DisplayWeather, WeatherError> {
        let coords = locator.current_position().await?;
        self.last_position = Some(coords);

        let weather = lookup(self.provider.as_ref(), &LocationQuery::Coords(coords)).await?;
        self.current = Some(LocationKey::CurrentLocation);
        Ok(weather)
    }

    /// Add the location on screen to favorites; returns whether the list changed.
    pub fn save_current(&mut self) -> Result<bool> {
        let added = match (&self.current, self.last_position) {
            (Some(LocationKey::CurrentLocation), Some(coords)) => {
                favorites::add_coords(&mut self.favorites, coords);
                true
            }
            (Some(LocationKey::City(name)), _) => favorites::add_city(&mut self.favorites, name),
            _ => false,
        };

        if added {
            self.store.save(&self.favorites)?;
            info!(count = self.favorites.len(), "saved favorite");
        }
        Ok(added)
    }

    /// Save a city without looking it up first.
    pub fn add_city(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WeatherError::EmptyQuery.into());
        }
        let added = favorites::add_city(&mut self.favorites, name);
        if added {
            self.store.save(&self.favorites)?;
        }
        Ok(added)
    }

    /// Remove favorites matching `key`; returns how many were dropped.
    pub fn remove(&mut self, key: &LocationKey) -> Result<usize> {
        let removed = favorites::remove(&mut self.favorites, key);
        self.store.save(&self.favorites)?;
        Ok(removed)
    }

    /// Look up every favorite concurrently. One failing entry never fails the batch.
    #[instrument(skip(self), fields(count = self.favorites.len()))]
    pub async fn refresh_favorites(&self) -> Vec<FavoriteReport> {
        let provider = self.provider.as_ref();

        let lookups = self.favorites.iter().map(|favorite| async move {
            let outcome = lookup(provider, &favorite.query()).await;
            if let Err(e) = &outcome {
                warn!(favorite = favorite.label(), error = %e, "failed to load weather for favorite");
            }
            FavoriteReport {
                favorite: favorite.clone(),
                outcome,
            }
        });

        join_all(lookups).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::InMemoryStore;
    use crate::location::FixedLocator;
    use crate::provider::testing::StubProvider;

    fn session_with(provider: StubProvider, store: Arc<InMemoryStore>) -> Session {
        Session::open(Box::new(provider), store).expect("open session")
    }

    #[tokio::test]
    async fn opens_with_stored_favorites() {
        let store = Arc::new(InMemoryStore::with(vec![Favorite::city("Paris")]));
        let session = session_with(StubProvider::default(), store);
        assert_eq!(session.favorites(), [Favorite::city("Paris")]);
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn search_sets_current_city() {
        let store = Arc::new(InMemoryStore::default());
        let mut session = session_with(StubProvider::default(), store);

        let weather = session.search("  Paris ").await.expect("search");
        assert_eq!(weather.location, "Paris, XX");
        assert_eq!(session.current(), Some(&LocationKey::City("Paris".into())));
    }

    #[tokio::test]
    async fn blank_search_is_rejected() {
        let store = Arc::new(InMemoryStore::default());
        let mut session = session_with(StubProvider::default(), store);

        let err = session.search("   ").await.unwrap_err();
        assert!(matches!(err, WeatherError::EmptyQuery));
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_location() {
        let store = Arc::new(InMemoryStore::default());
        let mut session = session_with(StubProvider::missing(&["Atlantis"]), store);

        session.search("Paris").await.expect("search");
        let err = session.search("Atlantis").await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound { .. }));
        assert_eq!(session.current(), Some(&LocationKey::City("Paris".into())));
    }

    #[tokio::test]
    async fn save_current_city_once() {
        let store = Arc::new(InMemoryStore::default());
        let mut session = session_with(StubProvider::default(), store.clone());

        assert!(!session.save_current().expect("nothing to save"));

        session.search("Paris").await.expect("search");
        assert!(session.save_current().expect("save"));
        assert!(!session.save_current().expect("duplicate"));
        assert_eq!(store.snapshot(), vec![Favorite::city("Paris")]);
    }

    #[tokio::test]
    async fn save_current_location_stores_coords() {
        let store = Arc::new(InMemoryStore::default());
        let mut session = session_with(StubProvider::default(), store.clone());

        let here = Coordinates::new(40.4, -3.7);
        let weather = session.locate(&FixedLocator(here)).await.expect("locate");
        assert_eq!(weather.location, "Here, XX");
        assert_eq!(session.current(), Some(&LocationKey::CurrentLocation));
        assert_eq!(session.last_position(), Some(here));

        assert!(session.save_current().expect("save"));
        assert_eq!(store.snapshot(), vec![Favorite::coords(here)]);
    }

    #[tokio::test]
    async fn locate_propagates_locator_errors() {
        let store = Arc::new(InMemoryStore::default());
        let mut session = session_with(StubProvider::default(), store);

        let err = session
            .locate(&FixedLocator(Coordinates::new(0.0, 200.0)))
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCoordinates));
        assert!(session.last_position().is_none());
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn remove_persists() {
        let here = Favorite::coords(Coordinates::new(1.0, 2.0));
        let store = Arc::new(InMemoryStore::with(vec![
            Favorite::city("Paris"),
            here.clone(),
            Favorite::city("Oslo"),
        ]));
        let mut session = session_with(StubProvider::default(), store.clone());

        assert_eq!(session.remove(&LocationKey::City("Oslo".into())).expect("remove"), 1);
        assert_eq!(session.remove(&LocationKey::CurrentLocation).expect("remove"), 1);
        assert_eq!(store.snapshot(), vec![Favorite::city("Paris")]);
    }

    #[tokio::test]
    async fn add_city_skips_existing() {
        let store = Arc::new(InMemoryStore::with(vec![Favorite::city("Paris")]));
        let mut session = session_with(StubProvider::default(), store.clone());

        assert!(!session.add_city("Paris").expect("add"));
        assert!(session.add_city("Rome").expect("add"));
        assert!(session.add_city("").is_err());
        assert_eq!(
            store.snapshot(),
            vec![Favorite::city("Paris"), Favorite::city("Rome")]
        );
    }

    #[tokio::test]
    async fn refresh_tolerates_individual_failures() {
        let store = Arc::new(InMemoryStore::with(vec![
            Favorite::city("Paris"),
            Favorite::city("Atlantis"),
            Favorite::coords(Coordinates::new(1.0, 2.0)),
        ]));
        let session = session_with(StubProvider::missing(&["Atlantis"]), store);

        let reports = session.refresh_favorites().await;
        assert_eq!(reports.len(), 3);
        assert!(reports[0].outcome.is_ok());
        assert!(matches!(
            reports[1].outcome,
            Err(WeatherError::NotFound { .. })
        ));
        assert_eq!(reports[1].favorite, Favorite::city("Atlantis"));
        let here = reports[2].outcome.as_ref().expect("coords lookup");
        assert_eq!(here.city(), "Here");
    }
}
