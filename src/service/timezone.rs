use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use typemap_rev::TypeMapKey;

impl TypeMapKey for TimezoneService {
    type Value = TimezoneService;
}

/// Resolves timezone names against a timezone database.
#[async_trait]
pub trait TimezoneResolver {
    async fn resolve(&self, name: &str) -> Option<Tz>;
}

/// Resolver backed by the IANA database compiled into `chrono-tz`.
pub struct ChronoTzResolver;

#[async_trait]
impl TimezoneResolver for ChronoTzResolver {
    async fn resolve(&self, name: &str) -> Option<Tz> {
        name.parse::<Tz>().ok()
    }
}

pub struct TimezoneService {
    resolver: Box<dyn TimezoneResolver + Send + Sync>,
}

impl TimezoneService {
    pub fn new(resolver: Box<dyn TimezoneResolver + Send + Sync>) -> TimezoneService {
        TimezoneService { resolver }
    }

    pub async fn resolve(&self, name: &str) -> Option<Tz> {
        self.resolver.resolve(name).await
    }

    pub fn current_time(timezone: Tz) -> String {
        Utc::now()
            .with_timezone(&timezone)
            .format("%Y-%m-%d %H:%M:%S %Z (%:z)")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_iana_names() {
        let service = TimezoneService::new(Box::new(ChronoTzResolver));
        assert_eq!(
            service.resolve("America/New_York").await,
            Some(Tz::America__New_York)
        );
        assert_eq!(service.resolve("Mars/Olympus_Mons").await, None);
        assert_eq!(service.resolve("").await, None);
    }

    #[test]
    fn current_time_carries_offset() {
        let formatted = TimezoneService::current_time(Tz::UTC);
        assert!(formatted.ends_with("UTC (+00:00)"));
    }
}
