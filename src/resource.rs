//! `Resource<T>`: a fetched value plus its loading / not-found / error flags.

use anyhow::Error;

/// One fetched value and the state of the fetch that produced it.
///
/// Several flags can be set at once; readers go through [`Resource::state`],
/// which picks loading, then not-found, then error, then data.
#[derive(Debug)]
pub struct Resource<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub not_found: bool,
    pub error: Option<Error>,
}

/// The single state a [`Resource`] is rendered as.
#[derive(Debug)]
pub enum ResourceState<'r, T> {
    Loading,
    NotFound,
    Failed(&'r Error),
    Ready(&'r T),
    /// Nothing requested yet.
    Empty,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            not_found: false,
            error: None,
        }
    }
}

impl<T> Resource<T> {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn ready(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn not_found() -> Self {
        Self {
            not_found: true,
            ..Self::default()
        }
    }

    pub fn failed(error: Error) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// `Ok(Some)` is data, `Ok(None)` is not-found, `Err` is an error.
    pub fn from_result(result: anyhow::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(data)) => Self::ready(data),
            Ok(None) => Self::not_found(),
            Err(e) => Self::failed(e),
        }
    }

    pub fn state(&self) -> ResourceState<'_, T> {
        if self.loading {
            ResourceState::Loading
        } else if self.not_found {
            ResourceState::NotFound
        } else if let Some(e) = &self.error {
            ResourceState::Failed(e)
        } else if let Some(data) = &self.data {
            ResourceState::Ready(data)
        } else {
            ResourceState::Empty
        }
    }

    /// Data, but only when the resource is in its terminal "data present" state.
    pub fn ready_data(&self) -> Option<&T> {
        match self.state() {
            ResourceState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        Resource {
            data: self.data.map(f),
            loading: self.loading,
            not_found: self.not_found,
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn from_result_maps_each_outcome() {
        assert!(matches!(Resource::from_result(Ok(Some(1))).state(), ResourceState::Ready(1)));
        assert!(matches!(Resource::<u8>::from_result(Ok(None)).state(), ResourceState::NotFound));
        assert!(matches!(
            Resource::<u8>::from_result(Err(anyhow!("boom"))).state(),
            ResourceState::Failed(_)
        ));
    }

    #[test]
    fn loading_wins_over_everything() {
        let r = Resource {
            data: Some(7),
            loading: true,
            not_found: true,
            error: Some(anyhow!("boom")),
        };
        assert!(matches!(r.state(), ResourceState::Loading));
        assert!(r.ready_data().is_none());
    }

    #[test]
    fn not_found_wins_over_error() {
        let r = Resource {
            data: Some(7),
            loading: false,
            not_found: true,
            error: Some(anyhow!("boom")),
        };
        assert!(matches!(r.state(), ResourceState::NotFound));
    }

    #[test]
    fn error_wins_over_data() {
        let r = Resource {
            data: Some(7),
            loading: false,
            not_found: false,
            error: Some(anyhow!("boom")),
        };
        match r.state() {
            ResourceState::Failed(e) => assert_eq!(e.to_string(), "boom"),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn default_is_empty() {
        assert!(matches!(Resource::<u8>::default().state(), ResourceState::Empty));
    }
}
