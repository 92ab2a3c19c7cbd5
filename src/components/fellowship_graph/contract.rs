use super::types::DataContract;

/// Display strings for a data-sharing contract. Pure projection, no validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ContractView {
	/// Comma-separated regulations, or "None".
	pub regulations: String,
	/// Comma-separated fields, or "All".
	pub permitted_fields: String,
	/// Grant lifetime in hours.
	pub expiry_hours: String,
	/// Policy text as given.
	pub policy: String,
}

impl ContractView {
	/// `None` when the node has no contract; that is a normal case.
	pub fn project(contract: Option<&DataContract>) -> Option<Self> {
		let contract = contract?;
		Some(Self {
			// empty regulations: none apply
			regulations: join_or(&contract.applicable_regulations, "None"),
			// empty permitted fields: unrestricted
			permitted_fields: join_or(&contract.permitted_fields, "All"),
			expiry_hours: contract.expiry_hours.to_string(),
			policy: contract.policy.clone(),
		})
	}
}

fn join_or(items: &[String], empty: &str) -> String {
	if items.is_empty() {
		empty.to_owned()
	} else {
		items.join(", ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn contract(regulations: &[&str], fields: &[&str]) -> DataContract {
		DataContract {
			applicable_regulations: regulations.iter().map(|s| s.to_string()).collect(),
			permitted_fields: fields.iter().map(|s| s.to_string()).collect(),
			expiry_hours: 48.0,
			policy: "Only repair data allowed".into(),
		}
	}

	#[test]
	fn absent_contract_renders_nothing() {
		assert_eq!(ContractView::project(None), None);
	}

	#[test]
	fn empty_lists_keep_opposite_meanings() {
		let view = ContractView::project(Some(&contract(&[], &[]))).unwrap();
		assert_eq!(view.regulations, "None");
		assert_eq!(view.permitted_fields, "All");
	}

	#[test]
	fn populated_lists_are_joined_verbatim() {
		let view =
			ContractView::project(Some(&contract(&["GDPR", "DPDP"], &["repair", "Serial No"]))).unwrap();
		assert_eq!(view.regulations, "GDPR, DPDP");
		assert_eq!(view.permitted_fields, "repair, Serial No");
		assert_eq!(view.expiry_hours, "48");
		assert_eq!(view.policy, "Only repair data allowed");
	}

	#[test]
	fn fractional_expiry_is_kept() {
		let mut c = contract(&[], &["diagnosis"]);
		c.expiry_hours = 1.5;
		assert_eq!(ContractView::project(Some(&c)).unwrap().expiry_hours, "1.5");
	}
}
