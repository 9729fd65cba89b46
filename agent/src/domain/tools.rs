//! Declarative registry of the operations the orchestrator may call.
//!
//! Three tools are exported: `write_json`, `read_json` and
//! `generate_sample_users`. Each declaration carries a JSON-schema parameter
//! object in the shape function-calling APIs accept. [`ToolRegistry::invoke`]
//! decodes the model-supplied arguments and always answers with a JSON value:
//! failures are reported inline as `{"error": "..."}` rather than raised.

use std::sync::{Arc, Mutex, PoisonError};

use mockable::Clock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sample_data::{GenerationRequest, GenerationResult, generate_users, read_json, write_json};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Name of the JSON file writer tool.
pub const WRITE_JSON: &str = "write_json";
/// Name of the JSON file reader tool.
pub const READ_JSON: &str = "read_json";
/// Name of the user generator tool.
pub const GENERATE_SAMPLE_USERS: &str = "generate_sample_users";

/// Name, description and parameter schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    /// Identifier the orchestrator uses to call the tool.
    pub name: &'static str,
    /// Human-readable summary shown to the model.
    pub description: &'static str,
    /// JSON-schema object describing the arguments.
    pub parameters: Value,
}

#[derive(Debug, Deserialize)]
struct WriteJsonArgs {
    filepath: String,
    data: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ReadJsonArgs {
    filepath: String,
}

#[derive(Debug, Deserialize)]
struct GenerateUsersArgs {
    first_names: Vec<String>,
    last_names: Vec<String>,
    domains: Vec<String>,
    #[serde(deserialize_with = "integral_number")]
    min_age: i64,
    #[serde(deserialize_with = "integral_number")]
    max_age: i64,
    city: Vec<String>,
}

/// Largest magnitude below which every whole `f64` is exact.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Accept whole JSON numbers written either as integers or as floats such as
/// `25.0`; models emit both.
fn integral_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    number
        .as_f64()
        .filter(|value| value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT)
        .map(|value| value as i64)
        .ok_or_else(|| de::Error::custom(format!("expected a whole number, found {number}")))
}

impl From<GenerateUsersArgs> for GenerationRequest {
    fn from(args: GenerateUsersArgs) -> Self {
        Self {
            first_names: args.first_names,
            last_names: args.last_names,
            domains: args.domains,
            min_age: args.min_age,
            max_age: args.max_age,
            cities: args.city,
        }
    }
}

/// Executes tool calls against the sample-data crate.
///
/// The registry owns the random source used for generation, so a fixed seed
/// makes a whole session reproducible, and reads the generation instant from
/// the injected clock.
pub struct ToolRegistry {
    rng: Mutex<ChaCha8Rng>,
    clock: Arc<dyn Clock>,
}

impl ToolRegistry {
    /// Build a registry, seeding the RNG from `seed` or from the thread RNG.
    #[must_use]
    pub fn new(seed: Option<u64>, clock: Arc<dyn Clock>) -> Self {
        let rng = seed.map_or_else(
            || ChaCha8Rng::from_rng(&mut rand::rng()),
            ChaCha8Rng::seed_from_u64,
        );
        Self {
            rng: Mutex::new(rng),
            clock,
        }
    }

    /// Declarations for every exported tool, in a stable order.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: WRITE_JSON,
                description: "Write a JSON object to a file using pretty formatting.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "filepath": {
                            "type": "string",
                            "description": "Path of the file to create or overwrite."
                        },
                        "data": {
                            "type": "object",
                            "description": "JSON object to write."
                        }
                    },
                    "required": ["filepath", "data"]
                }),
            },
            ToolDefinition {
                name: READ_JSON,
                description: "Read and return the contents of a JSON file as formatted text.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "filepath": {
                            "type": "string",
                            "description": "Path of the file to read."
                        }
                    },
                    "required": ["filepath"]
                }),
            },
            ToolDefinition {
                name: GENERATE_SAMPLE_USERS,
                description: "Generate sample user data for testing or seeding applications.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "first_names": string_list("First names; one user is generated per entry."),
                        "last_names": string_list("Last names, reused in order when fewer than first names."),
                        "domains": string_list("E-mail domains, reused in order when fewer than first names."),
                        "min_age": {
                            "type": "integer",
                            "description": "Smallest age, inclusive."
                        },
                        "max_age": {
                            "type": "integer",
                            "description": "Largest age, inclusive."
                        },
                        "city": string_list("Cities to pick from at random.")
                    },
                    "required": ["first_names", "last_names", "domains", "min_age", "max_age", "city"]
                }),
            },
        ]
    }

    /// Run the named tool with model-supplied `arguments`.
    ///
    /// `write_json` and `read_json` answer with their status or content
    /// string; `generate_sample_users` answers with the serialised
    /// [`GenerationResult`]. Unknown names and undecodable arguments produce
    /// an `{"error": "..."}` object.
    pub fn invoke(&self, name: &str, arguments: &Value) -> Value {
        debug!(tool = name, "invoking tool");
        let outcome = match name {
            WRITE_JSON => decode::<WriteJsonArgs>(name, arguments)
                .map(|args| Value::String(write_json(&args.filepath, &args.data))),
            READ_JSON => decode::<ReadJsonArgs>(name, arguments)
                .map(|args| Value::String(read_json(&args.filepath))),
            GENERATE_SAMPLE_USERS => decode::<GenerateUsersArgs>(name, arguments)
                .and_then(|args| self.generate(args.into())),
            _ => Err(format!("unknown tool '{name}'")),
        };
        outcome.unwrap_or_else(|message| {
            warn!(tool = name, error = %message, "tool call failed");
            json!({ "error": message })
        })
    }

    fn generate(&self, request: GenerationRequest) -> Result<Value, String> {
        let now = self.clock.utc();
        let result = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            GenerationResult::from(generate_users(&request, now, &mut *rng))
        };
        if let Some(error) = result.error_message() {
            debug!(error, "generation request rejected");
        }
        serde_json::to_value(&result).map_err(|err| format!("failed to encode users: {err}"))
    }
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description
    })
}

fn decode<T>(name: &str, arguments: &Value) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(arguments).map_err(|err| format!("invalid arguments for '{name}': {err}"))
}
