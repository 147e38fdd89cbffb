use std::cmp::Ordering;

/// A named entry in the directory and the phone numbers it owns.
///
/// Identity is the exact `(surname, given_name)` pair. Ordering uses the
/// composite key `surname + " " + given_name`, compared bytewise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    surname: String,
    given_name: String,
    phone_numbers: Vec<String>,
}

impl Subscriber {
    pub fn new(surname: impl Into<String>, given_name: impl Into<String>) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            phone_numbers: Vec::new(),
        }
    }

    pub fn with_phone_number(
        surname: impl Into<String>,
        given_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        let mut subscriber = Self::new(surname, given_name);
        subscriber.add_phone_number(phone_number);
        subscriber
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.given_name)
    }

    pub fn phone_numbers(&self) -> &[String] {
        &self.phone_numbers
    }

    pub fn is_empty(&self) -> bool {
        self.phone_numbers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.phone_numbers.len()
    }

    pub fn add_phone_number(&mut self, phone_number: impl Into<String>) {
        self.phone_numbers.push(phone_number.into());
    }

    /// Removes the first number equal to `phone_number`.
    pub fn remove_phone_number(&mut self, phone_number: &str) -> bool {
        match self.phone_numbers.iter().position(|p| p == phone_number) {
            Some(index) => {
                self.phone_numbers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn matches(&self, surname: &str, given_name: &str) -> bool {
        self.surname == surname && self.given_name == given_name
    }

    /// Compares this subscriber's composite key against `surname + " " + given_name`
    /// without building either string.
    pub fn cmp_key(&self, surname: &str, given_name: &str) -> Ordering {
        composite_key(&self.surname, &self.given_name)
            .cmp(composite_key(surname, given_name))
    }
}

fn composite_key<'a>(surname: &'a str, given_name: &'a str) -> impl Iterator<Item = u8> + 'a {
    surname
        .bytes()
        .chain(std::iter::once(b' '))
        .chain(given_name.bytes())
}
