use deadpool_postgres::GenericClient;
use dogs_core::list_filter::{DogFilter, DogQuery, SortKey};
use error_stack::{Report, ResultExt};
use tokio_postgres::Statement;
use tokio_postgres::types::Type;

#[derive(Debug, thiserror::Error)]
#[error("failed to prepare dogs statement")]
pub struct StatementPrepareError;

#[derive(Debug, Clone, Copy)]
pub struct Sql {
    pub query: &'static str,
    pub types: &'static [Type],
}

impl Sql {
    const fn new(query: &'static str, types: &'static [Type]) -> Self {
        Self { query, types }
    }

    /// Prepared statements belong to a single connection, so they go through the
    /// per-connection statement cache rather than being prepared once up front.
    pub async fn prepare<C>(&self, client: &C) -> Result<Statement, Report<StatementPrepareError>>
    where
        C: GenericClient,
    {
        client
            .prepare_typed_cached(self.query, self.types)
            .await
            .change_context(StatementPrepareError)
            .attach_with(|| self.query)
    }
}

const NO_PARAMS: &[Type] = &[];
const ID_PARAM: &[Type] = &[Type::INT8];
const BREED_PARAM: &[Type] = &[Type::VARCHAR];
const APARTMENT_PARAM: &[Type] = &[Type::BOOL];
const NEW_DOG_PARAMS: &[Type] = &[Type::VARCHAR, Type::INT4, Type::BOOL];
const DOG_PARAMS: &[Type] = &[Type::INT8, Type::VARCHAR, Type::INT4, Type::BOOL];

pub const GET: Sql = Sql::new(
    "select id, breed, weight, apartment from dogs where id = $1",
    ID_PARAM,
);

pub const LIST_ALL: Sql = Sql::new(
    "select id, breed, weight, apartment from dogs order by id",
    NO_PARAMS,
);

// collate "C" keeps the ordering bytewise regardless of the database locale
pub const LIST_BY_BREED: Sql = Sql::new(
    r#"select id, breed, weight, apartment from dogs order by breed collate "C", id"#,
    NO_PARAMS,
);

pub const LIST_BY_WEIGHT: Sql = Sql::new(
    "select id, breed, weight, apartment from dogs order by weight, id",
    NO_PARAMS,
);

pub const FIND_BY_BREED: Sql = Sql::new(
    "select id, breed, weight, apartment from dogs where breed = $1 order by id",
    BREED_PARAM,
);

pub const FIND_BY_BREED_BY_WEIGHT: Sql = Sql::new(
    "select id, breed, weight, apartment from dogs where breed = $1 order by weight, id",
    BREED_PARAM,
);

pub const FIND_BY_APARTMENT: Sql = Sql::new(
    "select id, breed, weight, apartment from dogs where apartment = $1 order by id",
    APARTMENT_PARAM,
);

pub const FIND_BY_APARTMENT_BY_BREED: Sql = Sql::new(
    r#"select id, breed, weight, apartment from dogs where apartment = $1 order by breed collate "C", id"#,
    APARTMENT_PARAM,
);

pub const FIND_BY_APARTMENT_BY_WEIGHT: Sql = Sql::new(
    "select id, breed, weight, apartment from dogs where apartment = $1 order by weight, id",
    APARTMENT_PARAM,
);

pub const COUNT: Sql = Sql::new("select count(*) as count from dogs", NO_PARAMS);

pub const CREATE: Sql = Sql::new(
    "insert into dogs (breed, weight, apartment) values ($1, $2, $3) returning id, breed, weight, apartment",
    NEW_DOG_PARAMS,
);

pub const SAVE: Sql = Sql::new(
    "insert into dogs (id, breed, weight, apartment) values ($1, $2, $3, $4) \
     on conflict (id) do update set breed = excluded.breed, weight = excluded.weight, apartment = excluded.apartment \
     returning id, breed, weight, apartment",
    DOG_PARAMS,
);

// an explicit id bypasses the identity sequence. The sequence only ever moves forward,
// so ids of deleted dogs are never handed out again.
pub const ADVANCE_ID_SEQUENCE: Sql = Sql::new(
    "select setval('dogs_id_seq', $1) from dogs_id_seq where $1 >= last_value",
    ID_PARAM,
);

pub const DELETE: Sql = Sql::new("delete from dogs where id = $1", ID_PARAM);

pub const DELETE_BY_BREED: Sql = Sql::new("delete from dogs where breed = $1", BREED_PARAM);

pub const ENABLE_UNIQUE_BREEDS: &str =
    "create unique index if not exists dogs_breed_key on dogs (breed)";

pub const DISABLE_UNIQUE_BREEDS: &str = "drop index if exists dogs_breed_key";

/// Every (filter, sort) pair a [`DogQuery`] can name maps to exactly one statement.
/// A breed filter is exact, so ordering its matches by breed is the same as by id.
pub fn for_query(query: &DogQuery) -> Sql {
    match (&query.filter, query.sort) {
        (DogFilter::None, SortKey::Id) => LIST_ALL,
        (DogFilter::None, SortKey::Breed) => LIST_BY_BREED,
        (DogFilter::None, SortKey::Weight) => LIST_BY_WEIGHT,
        (DogFilter::Breed(_), SortKey::Id | SortKey::Breed) => FIND_BY_BREED,
        (DogFilter::Breed(_), SortKey::Weight) => FIND_BY_BREED_BY_WEIGHT,
        (DogFilter::Apartment(_), SortKey::Id) => FIND_BY_APARTMENT,
        (DogFilter::Apartment(_), SortKey::Breed) => FIND_BY_APARTMENT_BY_BREED,
        (DogFilter::Apartment(_), SortKey::Weight) => FIND_BY_APARTMENT_BY_WEIGHT,
    }
}
