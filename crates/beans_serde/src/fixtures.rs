//! A small address book model shared by the tests.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use beans_reflect::bean::{Bean, MetaBean, MetaBeanCell, TypedBean};
use beans_reflect::collections::{Grid, Multiset, Table};
use beans_reflect::impl_bean_value;
use beans_reflect::info::TypeToken;
use beans_reflect::registry::TypeRegistry;
use beans_reflect::value::{Collection, Value};

// -----------------------------------------------------------------------------
// Model

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u8,
    pub address: Option<Address>,
    pub nicknames: Vec<String>,
    pub reminder: Option<Duration>,
    pub extra: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    pub owner: String,
    pub people: Vec<Person>,
    pub primary: Option<Box<dyn Bean>>,
    pub labels: Multiset<String>,
    pub by_name: BTreeMap<String, Person>,
    pub locations: BTreeMap<Address, String>,
    pub distances: Table<String, String, u32>,
    pub seating: Grid<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Empty;

/// One property per collection shape, with nullable entries where the
/// shape allows them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shapes {
    pub list: Vec<Option<String>>,
    pub set: BTreeSet<u32>,
    pub counted: Multiset<String>,
    pub map: BTreeMap<String, Option<i64>>,
    pub table: Table<String, u32, String>,
    pub grid: Grid<String>,
}

/// A bean whose simple name collides with the `Duration` alias.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub element: String,
    pub child: Option<Empty>,
}

impl TypedBean for Address {
    const TYPE_PATH: &'static str = "contacts::Address";

    fn meta() -> &'static MetaBean {
        static META: MetaBeanCell = MetaBeanCell::new();
        META.get_or_init(|| {
            MetaBean::builder::<Self>()
                .property("street", |a| &a.street, |a, v| a.street = v)
                .property("city", |a| &a.city, |a, v| a.city = v)
                .optional("zip", |a| &a.zip, |a, v| a.zip = v)
                .build()
        })
    }
}

impl TypedBean for Contact {
    const TYPE_PATH: &'static str = "contacts::Contact";

    fn meta() -> &'static MetaBean {
        static META: MetaBeanCell = MetaBeanCell::new();
        META.get_or_init(|| {
            MetaBean::builder::<Self>()
                .property("name", |c| &c.name, |c, v| c.name = v)
                .build()
        })
    }
}

impl TypedBean for Person {
    const TYPE_PATH: &'static str = "contacts::Person";

    fn meta() -> &'static MetaBean {
        static META: MetaBeanCell = MetaBeanCell::new();
        META.get_or_init(|| {
            MetaBean::builder::<Self>()
                .property("name", |p| &p.name, |p, v| p.name = v)
                .property("age", |p| &p.age, |p, v| p.age = v)
                .optional("address", |p| &p.address, |p, v| p.address = v)
                .property("nicknames", |p| &p.nicknames, |p, v| p.nicknames = v)
                .optional("reminder", |p| &p.reminder, |p, v| p.reminder = v)
                .optional("extra", |p| &p.extra, |p, v| p.extra = v)
                .derived("initial", |p| p.name.chars().next().unwrap_or(' '))
                .supertype(Contact::TYPE_PATH)
                .build()
        })
    }
}

impl TypedBean for AddressBook {
    const TYPE_PATH: &'static str = "contacts::AddressBook";

    fn meta() -> &'static MetaBean {
        static META: MetaBeanCell = MetaBeanCell::new();
        META.get_or_init(|| {
            MetaBean::builder::<Self>()
                .property("owner", |b| &b.owner, |b, v| b.owner = v)
                .property("people", |b| &b.people, |b, v| b.people = v)
                .property_as(
                    "primary",
                    TypeToken::named(Contact::TYPE_PATH),
                    |b| &b.primary,
                    |b, v| b.primary = v,
                )
                .property("labels", |b| &b.labels, |b, v| b.labels = v)
                .property("byName", |b| &b.by_name, |b, v| b.by_name = v)
                .property("locations", |b| &b.locations, |b, v| b.locations = v)
                .property("distances", |b| &b.distances, |b, v| b.distances = v)
                .property("seating", |b| &b.seating, |b, v| b.seating = v)
                .build()
        })
    }
}

impl TypedBean for Empty {
    const TYPE_PATH: &'static str = "contacts::Empty";

    fn meta() -> &'static MetaBean {
        static META: MetaBeanCell = MetaBeanCell::new();
        META.get_or_init(|| MetaBean::builder::<Self>().build())
    }
}

impl TypedBean for Shapes {
    const TYPE_PATH: &'static str = "contacts::Shapes";

    fn meta() -> &'static MetaBean {
        static META: MetaBeanCell = MetaBeanCell::new();
        META.get_or_init(|| {
            MetaBean::builder::<Self>()
                .property("list", |s| &s.list, |s, v| s.list = v)
                .property("set", |s| &s.set, |s, v| s.set = v)
                .property("counted", |s| &s.counted, |s, v| s.counted = v)
                .property("map", |s| &s.map, |s, v| s.map = v)
                .property("table", |s| &s.table, |s, v| s.table = v)
                .property("grid", |s| &s.grid, |s, v| s.grid = v)
                .build()
        })
    }
}

impl TypedBean for Span {
    const TYPE_PATH: &'static str = "contacts::Duration";

    fn meta() -> &'static MetaBean {
        static META: MetaBeanCell = MetaBeanCell::new();
        META.get_or_init(|| {
            MetaBean::builder::<Self>()
                .property("label", |s| &s.label, |s, v| s.label = v)
                .build()
        })
    }
}

impl TypedBean for Element {
    const TYPE_PATH: &'static str = "contacts::Element";

    fn meta() -> &'static MetaBean {
        static META: MetaBeanCell = MetaBeanCell::new();
        META.get_or_init(|| {
            MetaBean::builder::<Self>()
                .property("element", |e| &e.element, |e, v| e.element = v)
                .optional("child", |e| &e.child, |e, v| e.child = v)
                .build()
        })
    }
}

impl_bean_value!(Address);
impl_bean_value!(Contact);
impl_bean_value!(Person);
impl_bean_value!(AddressBook);
impl_bean_value!(Empty);
impl_bean_value!(Element);
impl_bean_value!(Span);
impl_bean_value!(Shapes);

// -----------------------------------------------------------------------------
// Samples

pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<AddressBook>();
    registry.register::<Contact>();
    registry.register::<Element>();
    registry.register::<Span>();
    registry.register::<Shapes>();
    registry
}

pub fn text(s: &str) -> String {
    String::from(s)
}

pub fn address(street: &str, city: &str, zip: Option<u32>) -> Address {
    Address {
        street: text(street),
        city: text(city),
        zip,
    }
}

pub fn person(name: &str, age: u8) -> Person {
    Person {
        name: text(name),
        age,
        ..Person::default()
    }
}

/// An address book using every collection shape, nested beans, a subtype
/// behind a supertype declaration and an `Any` property.
pub fn sample_book() -> AddressBook {
    let mut ann = person("Ann", 34);
    ann.address = Some(address("1 High St", "Leeds", Some(12345)));
    ann.nicknames = Vec::from([text("x"), text("y")]);
    ann.reminder = Some(Duration::from_millis(1500));
    ann.extra = Some(Value::I64(-7));

    let mut bob = person("Bob", 51);
    bob.extra = Some(Value::Collection(Collection::List(Vec::from([
        Some(Value::from("plain")),
        None,
        Some(Value::Bool(true)),
    ]))));

    let mut labels = Multiset::new();
    labels.add_count(text("A"), 3);
    labels.add(text("B"));

    let mut distances = Table::new();
    distances.put(text("Leeds"), text("York"), 40);
    distances.put(text("York"), text("Hull"), 60);

    let mut seating = Grid::new(2, 3).unwrap_or_default();
    let _ = seating.put(1, 2, text("Ann"));
    let _ = seating.put(0, 0, text("Bob"));

    AddressBook {
        owner: text("Carol"),
        people: Vec::from([ann.clone(), bob.clone()]),
        primary: Some(Box::new(bob.clone())),
        labels,
        by_name: BTreeMap::from([(text("ann"), ann), (text("bob"), bob)]),
        locations: BTreeMap::from([
            (address("1 High St", "Leeds", None), text("home")),
            (address("2 Low Rd", "York", Some(7)), text("work")),
        ]),
        distances,
        seating,
    }
}

/// Every shape with no entries, one entry and several entries.
pub fn shape_cases() -> [Shapes; 3] {
    let empty = Shapes::default();

    let mut one = Shapes {
        list: Vec::from([None]),
        set: BTreeSet::from([7]),
        map: BTreeMap::from([(text("a"), None)]),
        grid: Grid::new(2, 3).unwrap_or_default(),
        ..Shapes::default()
    };
    one.counted.add_count(text("A"), 2);
    one.table.put(text("Leeds"), 1, text("x"));
    let _ = one.grid.put(1, 2, text("Ann"));

    let mut many = Shapes {
        list: Vec::from([Some(text("x")), None, Some(text("")), Some(text("x"))]),
        set: BTreeSet::from([1, 2, 3]),
        map: BTreeMap::from([
            (text("a"), Some(1)),
            (text("b"), None),
            (text("c"), Some(-3)),
        ]),
        grid: Grid::new(3, 2).unwrap_or_default(),
        ..Shapes::default()
    };
    many.counted.add_count(text("A"), 3);
    many.counted.add(text("B"));
    many.table.put(text("Leeds"), 1, text("x"));
    many.table.put(text("Leeds"), 2, text("y"));
    many.table.put(text("York"), 1, text("z"));
    let _ = many.grid.put(0, 0, text("Bob"));
    let _ = many.grid.put(2, 1, text("Ann"));

    [empty, one, many]
}
