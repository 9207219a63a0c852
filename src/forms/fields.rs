//! The forms on the balance sheet edit page and the records they submit.

use maud::{Markup, html};

use crate::{
    api::FormBody,
    html::{FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// How a form field is rendered and populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    /// A choice of a related record, whose option values are URL paths.
    Select,
    Checkbox,
}

/// One field of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            label,
            kind,
            required,
        }
    }
}

/// The layout of a form: its element ID, the tab it lives in, and its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    pub id: &'static str,
    pub tab: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FormSchema {
    /// Get the field called `name`.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

pub const TRANSACTION_FORM: FormSchema = FormSchema {
    id: "transactionForm",
    tab: "transaction",
    fields: &[
        FieldSpec::new("date", "Date", FieldKind::Date, true),
        FieldSpec::new("credit", "Credit", FieldKind::Select, true),
        FieldSpec::new("debit", "Debit", FieldKind::Select, true),
        FieldSpec::new("amount", "Amount", FieldKind::Number, true),
        FieldSpec::new("memo", "Memo", FieldKind::Text, false),
        FieldSpec::new("complete", "Complete", FieldKind::Checkbox, false),
    ],
};

pub const BALANCE_FORM: FormSchema = FormSchema {
    id: "balanceForm",
    tab: "balance",
    fields: &[
        FieldSpec::new("account", "Account", FieldKind::Select, true),
        FieldSpec::new("beginning", "Beginning", FieldKind::Number, true),
        FieldSpec::new("ending", "Ending", FieldKind::Number, true),
    ],
};

pub const PAYMENT_FORM: FormSchema = FormSchema {
    id: "paymentsForm",
    tab: "payment",
    fields: &[FieldSpec::new("payment", "Payment", FieldKind::Select, false)],
};

/// The flat record built from a submitted form.
///
/// When a field name repeats, the last value wins and keeps the position
/// of the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut fields: Vec<(String, String)> = Vec::with_capacity(pairs.len());

        for (name, value) in pairs {
            match fields.iter_mut().find(|(existing, _)| *existing == name) {
                Some(field) => field.1 = value,
                None => fields.push((name, value)),
            }
        }

        Self(fields)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn as_body(&self) -> &FormBody {
        &self.0
    }
}

/// A choice in a select field.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Render the input for `field`. `options` is only used for select fields.
pub fn field_input(form_id: &str, field: &FieldSpec, options: &[SelectOption]) -> Markup {
    let input_id = format!("{form_id}-{}", field.name);

    match field.kind {
        FieldKind::Checkbox => html!(
            div class="flex items-center gap-2"
            {
                input
                    id=(input_id)
                    type="checkbox"
                    name=(field.name)
                    value="true"
                    class=(FORM_CHECKBOX_STYLE);

                label for=(input_id) class=(FORM_LABEL_STYLE) { (field.label) }
            }
        ),
        FieldKind::Select => html!(
            div
            {
                label for=(input_id) class=(FORM_LABEL_STYLE) { (field.label) }

                select
                    id=(input_id)
                    name=(field.name)
                    required[field.required]
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "---------" }

                    @for option in options {
                        option value=(option.value) { (option.label) }
                    }
                }
            }
        ),
        FieldKind::Text | FieldKind::Number | FieldKind::Date => {
            let (input_type, step) = match field.kind {
                FieldKind::Number => ("number", Some("0.01")),
                FieldKind::Date => ("date", None),
                _ => ("text", None),
            };

            html!(
                div
                {
                    label for=(input_id) class=(FORM_LABEL_STYLE) { (field.label) }

                    input
                        id=(input_id)
                        type=(input_type)
                        name=(field.name)
                        step=[step]
                        required[field.required]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            )
        }
    }
}

#[cfg(test)]
mod form_fields_tests {
    use super::FormFields;

    fn pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn last_repeated_value_wins() {
        let fields = FormFields::from_pairs(pairs(&[
            ("amount", "1.00"),
            ("memo", "rent"),
            ("amount", "2.00"),
        ]));

        assert_eq!(fields.get("amount"), Some("2.00"));
        assert_eq!(
            fields.as_body(),
            pairs(&[("amount", "2.00"), ("memo", "rent")]).as_slice()
        );
    }

    #[test]
    fn missing_field() {
        let fields = FormFields::from_pairs(pairs(&[("memo", "rent")]));

        assert_eq!(fields.get("amount"), None);
    }
}
