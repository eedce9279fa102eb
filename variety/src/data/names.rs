//! First names, last names and mail domains.

pub(crate) const FEMALE_FIRST_NAMES: &[&str] = &[
    "Alice", "Amelia", "Anna", "Beatrice", "Camille", "Charlotte", "Chloe", "Clara", "Diane",
    "Elena", "Eleanor", "Emma", "Eva", "Grace", "Hannah", "Iris", "Isabel", "Jade", "Julia",
    "Laura", "Lea", "Lucia", "Margot", "Maria", "Mia", "Nina", "Olivia", "Paula", "Rose",
    "Sarah", "Sofia", "Victoria", "Zoe",
];

pub(crate) const MALE_FIRST_NAMES: &[&str] = &[
    "Adam", "Alexander", "Antoine", "Arthur", "Benjamin", "Carlos", "Daniel", "David", "Diego",
    "Edward", "Felix", "Gabriel", "George", "Hugo", "Jack", "James", "Jonas", "Leo", "Louis",
    "Lucas", "Marco", "Martin", "Matteo", "Noah", "Oliver", "Oscar", "Paul", "Pierre", "Samuel",
    "Thomas", "Victor", "William",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Anderson", "Bauer", "Bernard", "Brown", "Clarke", "Costa", "Davies", "Dubois", "Durand",
    "Evans", "Fernandez", "Fischer", "Garcia", "Gonzalez", "Hall", "Hoffmann", "Johnson",
    "Keller", "Lambert", "Lopez", "Martin", "Martinez", "Meyer", "Miller", "Moreau", "Muller",
    "Petit", "Ricci", "Rossi", "Ruiz", "Schmidt", "Schneider", "Smith", "Taylor", "Thomas",
    "Walker", "Weber", "Williams", "Wilson", "Wright",
];

pub(crate) const EMAIL_DOMAINS: &[&str] = &[
    "example.com",
    "example.org",
    "example.net",
    "mail.test",
    "inbox.test",
    "company.test",
];
