/// Keyword rules applied in order; matches accumulate.
const RULES: &[(&str, &[&str])] = &[
	("repair", &["repair"]),
	("diagnosis", &["diagnosis"]),
	("install", &["installation"]),
	("cooling", &["cooling_analysis"]),
	("fraud", &["fraud_detection"]),
	("logistics", &["logistics", "part_delivery"]),
];

/// Capability fallback when no keyword matches.
pub const DEFAULT_CAPABILITY: &str = "repair";

/// Guess the capabilities a free-text issue description needs.
pub fn extract_capabilities(description: &str) -> Vec<String> {
	let lowered = description.to_lowercase();
	let caps: Vec<String> = RULES
		.iter()
		.filter(|(keyword, _)| lowered.contains(*keyword))
		.flat_map(|(_, caps)| caps.iter().map(|c| c.to_string()))
		.collect();

	if caps.is_empty() {
		vec![DEFAULT_CAPABILITY.to_owned()]
	} else {
		caps
	}
}
