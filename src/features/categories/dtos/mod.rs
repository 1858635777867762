mod category_dto;

pub use category_dto::{
    CategoryDetailDto, CategoryListItemDto, CategoryResponseDto, CategorySummaryDto,
    CreateCategoryDto, CreateCategoryPayload,
};
