//! Cities, street names and zip code layouts per country.

pub(crate) const FRENCH_CITIES: &[&str] = &[
    "Paris", "Lyon", "Marseille", "Toulouse", "Nantes", "Bordeaux", "Lille", "Rennes",
    "Strasbourg", "Montpellier",
];

pub(crate) const FRENCH_STREETS: &[&str] = &[
    "rue de la Paix", "avenue Victor Hugo", "boulevard Voltaire", "rue du Faubourg",
    "place de la Republique", "rue des Lilas", "quai des Orfevres", "rue Lafayette",
];

pub(crate) const GERMAN_CITIES: &[&str] = &[
    "Berlin", "Hamburg", "Munich", "Cologne", "Frankfurt", "Stuttgart", "Dresden", "Leipzig",
    "Bremen", "Hanover",
];

pub(crate) const GERMAN_STREETS: &[&str] = &[
    "Hauptstrasse", "Bahnhofstrasse", "Gartenweg", "Schillerstrasse", "Goethestrasse",
    "Lindenallee", "Bergstrasse", "Kirchplatz",
];

pub(crate) const SPANISH_CITIES: &[&str] = &[
    "Madrid", "Barcelona", "Valencia", "Seville", "Zaragoza", "Malaga", "Bilbao", "Granada",
];

pub(crate) const SPANISH_STREETS: &[&str] = &[
    "Calle Mayor", "Gran Via", "Paseo del Prado", "Calle de Alcala", "Avenida de America",
    "Calle Real", "Plaza de Espana",
];

pub(crate) const BRITISH_CITIES: &[&str] = &[
    "London", "Manchester", "Birmingham", "Leeds", "Bristol", "Liverpool", "Edinburgh",
    "Glasgow", "Cardiff",
];

pub(crate) const BRITISH_STREETS: &[&str] = &[
    "High Street", "Station Road", "Church Lane", "Victoria Road", "Park Avenue", "Mill Lane",
    "Kings Road", "Queen Street",
];

pub(crate) const AMERICAN_CITIES: &[&str] = &[
    "New York", "Chicago", "Boston", "Seattle", "Denver", "Austin", "Portland", "Atlanta",
    "San Diego", "Philadelphia",
];

pub(crate) const AMERICAN_STREETS: &[&str] = &[
    "Main Street", "Oak Avenue", "Maple Drive", "Washington Boulevard", "Elm Street",
    "Lake Shore Drive", "Sunset Boulevard", "Broadway",
];

pub(crate) const FIVE_DIGIT_ZIP: &str = "NNNNN";
pub(crate) const BRITISH_POSTCODE: &str = "XXN NXX";
