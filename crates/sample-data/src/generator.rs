//! Synthetic user generation.
//!
//! The generator is pure apart from the two collaborators it is handed: the
//! generation instant and a random source. Supplying a seeded RNG and a fixed
//! instant makes output fully reproducible.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::GenerationError;
use crate::record::{GeneratedUsers, GenerationRequest, UserRecord};
use crate::validation::validate_request;

/// Smallest numeric suffix appended to a user name.
const USER_NAME_SUFFIX_MIN: u16 = 100;

/// Largest numeric suffix appended to a user name.
const USER_NAME_SUFFIX_MAX: u16 = 999;

/// Furthest a registration date may lie before the generation instant.
const MAX_REGISTRATION_AGE_DAYS: i64 = 365;

/// Generates one user record per first name in the request.
///
/// Last names and domains are reused cyclically when their lists are shorter
/// than `first_names`. Each record receives:
///
/// - a one-based `id` in request order
/// - an e-mail built from the lower-cased name parts and the domain
/// - a user name made of the lower-cased first name and a three-digit suffix
/// - an age drawn uniformly from `min_age..=max_age`
/// - a city drawn uniformly from `cities`
/// - a registration instant between 0 and 365 whole days before `now`
///
/// # Errors
///
/// Returns [`GenerationError`] when the request fails validation; no records
/// are produced in that case.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use sample_data::{GenerationRequest, generate_users};
///
/// let request = GenerationRequest {
///     first_names: vec!["Ann".to_owned()],
///     last_names: vec!["Lee".to_owned()],
///     domains: vec!["x.com".to_owned()],
///     min_age: 20,
///     max_age: 20,
///     cities: vec!["Rome".to_owned()],
/// };
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let generated = generate_users(&request, Utc::now(), &mut rng).expect("valid request");
///
/// assert_eq!(generated.count, 1);
/// let user = generated.users.first().expect("one user");
/// assert_eq!(user.id, 1);
/// assert_eq!(user.age, 20);
/// assert_eq!(user.city, "Rome");
/// assert_eq!(user.email, "ann.lee@x.com");
/// ```
pub fn generate_users<R>(
    request: &GenerationRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<GeneratedUsers, GenerationError>
where
    R: Rng + ?Sized,
{
    validate_request(request)?;

    let name_parts = request
        .first_names
        .iter()
        .zip(request.last_names.iter().cycle())
        .zip(request.domains.iter().cycle())
        .map(|((first, last), domain)| NameParts {
            first,
            last,
            domain,
        });

    let mut users = Vec::with_capacity(request.first_names.len());
    for (index, parts) in name_parts.enumerate() {
        let user = generate_single_user(rng, request, index + 1, &parts, now)?;
        users.push(user);
    }

    Ok(GeneratedUsers::new(users))
}

/// Name components resolved for one record.
struct NameParts<'a> {
    first: &'a str,
    last: &'a str,
    domain: &'a str,
}

/// Builds a single record; random draws happen in field order.
fn generate_single_user<R>(
    rng: &mut R,
    request: &GenerationRequest,
    id: usize,
    parts: &NameParts<'_>,
    now: DateTime<Utc>,
) -> Result<UserRecord, GenerationError>
where
    R: Rng + ?Sized,
{
    let first_lower = parts.first.to_lowercase();
    let last_lower = parts.last.to_lowercase();

    let email = format!("{first_lower}.{last_lower}@{}", parts.domain);
    let suffix = rng.random_range(USER_NAME_SUFFIX_MIN..=USER_NAME_SUFFIX_MAX);
    let user_name = format!("{first_lower}{suffix}");
    let age = rng.random_range(request.min_age..=request.max_age);
    let city = request
        .cities
        .choose(rng)
        .ok_or(GenerationError::EmptyCities)?
        .clone();
    let offset_days = rng.random_range(0..=MAX_REGISTRATION_AGE_DAYS);
    let registered_at = now - TimeDelta::days(offset_days);

    Ok(UserRecord {
        id,
        first_name: parts.first.to_owned(),
        last_name: parts.last.to_owned(),
        email,
        user_name,
        age,
        city,
        registered_at,
    })
}
