mod product_dto;

pub use product_dto::{
    CreateProductDto, CreateProductPayload, ProductDetailDto, ProductListItemDto,
    ProductResponseDto,
};
