//! Lorem ipsum vocabulary.

pub(crate) const LATIN_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla",
    "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt",
    "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id", "est", "laborum", "integer",
    "vitae", "justo", "eget", "nunc", "mattis", "pellentesque", "habitant", "morbi",
    "tristique", "senectus", "netus", "malesuada", "fames", "ac", "turpis", "egestas", "porta",
    "lacus", "viverra", "accumsan", "arcu", "bibendum", "augue", "neque", "gravida", "fringilla",
];
