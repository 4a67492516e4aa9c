use crate::reference::OutcodeRecord;

/// Prompt handed to a [`TextGenerator`](super::TextGenerator): the rendered instruction text plus
/// the structured context it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightPrompt {
    region_code: String,
    outcode: Option<OutcodeRecord>,
    text: String,
}

impl InsightPrompt {
    pub fn for_region(region_code: &str, outcode: Option<&OutcodeRecord>) -> Self {
        let region_code = region_code.trim().to_ascii_uppercase();
        let mut text = format!(
            "You are a London property market analyst. In two or three sentences, summarise the \
             house-price outlook for the {region_code} postcode district over the next twelve months."
        );

        if let Some(record) = outcode {
            text.push_str(&format!(
                " Context: {} ({}), average price £{}, {} price band. {}",
                record.name,
                record.id,
                format_pounds(u64::from(record.average_price)),
                record.price_category,
                record.description
            ));
        }

        Self {
            region_code,
            outcode: outcode.cloned(),
            text,
        }
    }

    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    pub fn outcode(&self) -> Option<&OutcodeRecord> {
        self.outcode.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Groups a whole-pound amount in thousands without the currency sign: `1450000` -> `1,450,000`.
pub fn format_pounds(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
