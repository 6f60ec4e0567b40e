use uuid::Uuid;
use crate::books::domain::model::{AuthorEntity, BookEntity};
use crate::books::repository::BookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;

pub(crate) const GEORGE_MARTIN: Uuid = Uuid::from_u128(0xd28888e9_2ba9_473a_a40f_e38cb54f9b35);
pub(crate) const STEPHEN_FRY: Uuid = Uuid::from_u128(0xda2fd609_d754_4feb_8acd_c4f9ff13ba96);
pub(crate) const JAMES_ELLROY: Uuid = Uuid::from_u128(0x24810dfc_2d94_4cc7_aab5_cdf98b83f0c9);
pub(crate) const DOUGLAS_ADAMS: Uuid = Uuid::from_u128(0x2902b665_1190_4c70_9915_b9c2d7680450);

pub(crate) const A_GAME_OF_THRONES: Uuid = Uuid::from_u128(0x5b1c2b4d_48c7_402a_80c3_cc796ad49c6b);
pub(crate) const THE_WINDS_OF_WINTER: Uuid = Uuid::from_u128(0xd8663e5e_7494_4f81_8739_6e0de1bea7ee);
pub(crate) const MYTHOS: Uuid = Uuid::from_u128(0xd173e20d_159e_4127_9ce9_b0ac2564ad97);
pub(crate) const AMERICAN_TABLOID: Uuid = Uuid::from_u128(0x493c3228_3444_4a49_9cc0_e8532edc59b2);
pub(crate) const HITCHHIKERS_GUIDE: Uuid = Uuid::from_u128(0x40ff5488_fdab_45b5_bc3a_14302d59869a);

pub(crate) fn create_book_repository() -> Box<dyn BookRepository> {
    let martin = AuthorEntity::new(GEORGE_MARTIN, "George", "RR Martin");
    let fry = AuthorEntity::new(STEPHEN_FRY, "Stephen", "Fry");
    let ellroy = AuthorEntity::new(JAMES_ELLROY, "James", "Ellroy");
    let adams = AuthorEntity::new(DOUGLAS_ADAMS, "Douglas", "Adams");
    let books = vec![
        BookEntity::with_id(A_GAME_OF_THRONES, &martin, "A Game of Thrones",
                            Some("The first book in A Song of Ice and Fire.")),
        BookEntity::with_id(THE_WINDS_OF_WINTER, &martin, "The Winds of Winter",
                            Some("The sixth book in A Song of Ice and Fire.")),
        BookEntity::with_id(MYTHOS, &fry, "Mythos",
                            Some("The Greek myths, retold.")),
        BookEntity::with_id(AMERICAN_TABLOID, &ellroy, "American Tabloid",
                            Some("The first book in the Underworld USA trilogy.")),
        BookEntity::with_id(HITCHHIKERS_GUIDE, &adams, "The Hitchhiker's Guide to the Galaxy",
                            Some("Don't panic.")),
    ];
    Box::new(MemoryBookRepository::new(vec![martin, fry, ellroy, adams], books))
}
