use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Alias, Expr, OnConflict};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{AddToCartRequest, CartView, UpdateCartQuantityRequest},
    entity::{
        cart_items::{ActiveModel as CartActive, Column as CartCol, Entity as CartItems, Model as CartModel},
        menu_items::Entity as MenuItems,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::CartItem,
    pricing::{self, PriceSummary},
    response::{ApiResponse, Meta},
    services::require_positive,
    state::AppState,
};

pub async fn get_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let items: Vec<CartItem> = CartItems::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .order_by_asc(CartCol::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(cart_item_from_entity)
        .collect();

    let view = cart_view(items)?;
    let meta = Meta::unpaged(view.items.len());
    Ok(ApiResponse::success("OK", view, Some(meta)))
}

/// Adds `quantity` units of a menu item. A line that already holds the item
/// grows instead of a second line being created.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let quantity = require_positive(payload.quantity, "quantity")?;

    let menu_item = MenuItems::find_by_id(payload.menu_item_id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::BadRequest("menu item not found".to_string()))?;
    if !menu_item.in_stock {
        return Err(AppError::BadRequest(format!(
            "{} is out of stock",
            menu_item.name
        )));
    }

    let existing = CartItems::find()
        .filter(
            Condition::all()
                .add(CartCol::UserId.eq(user.user_id))
                .add(CartCol::MenuItemId.eq(menu_item.id)),
        )
        .one(state.db())
        .await?;

    let line = match existing {
        Some(line) => {
            let merged = pricing::merge_quantity(line.quantity, quantity)?;
            let mut active: CartActive = line.into();
            active.quantity = Set(merged);
            active.update(state.db()).await?
        }
        None => {
            let line = CartActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.user_id),
                menu_item_id: Set(menu_item.id),
                name: Set(menu_item.name),
                price: Set(menu_item.price),
                category_id: Set(menu_item.category_id),
                image_url: Set(menu_item.image_url),
                description: Set(menu_item.description),
                quantity: Set(quantity),
                created_at: NotSet,
            };
            // A concurrent add may have created the line since the lookup.
            CartItems::insert(line)
                .on_conflict(
                    OnConflict::columns([CartCol::UserId, CartCol::MenuItemId])
                        .value(
                            CartCol::Quantity,
                            Expr::col((CartItems, CartCol::Quantity))
                                .add(Expr::col((Alias::new("excluded"), CartCol::Quantity))),
                        )
                        .to_owned(),
                )
                .exec_with_returning(state.db())
                .await?
        }
    };

    audit::record(
        state.db(),
        Some(user.user_id),
        "cart_update",
        "cart_items",
        serde_json::json!({ "menu_item_id": line.menu_item_id, "quantity": line.quantity }),
    )
    .await;

    Ok(ApiResponse::success("OK", cart_item_from_entity(line), None))
}

pub async fn update_quantity(
    state: &AppState,
    user: &AuthUser,
    menu_item_id: Uuid,
    payload: UpdateCartQuantityRequest,
) -> AppResult<ApiResponse<CartItem>> {
    let quantity = require_positive(payload.quantity, "quantity")?;

    let line = CartItems::find()
        .filter(
            Condition::all()
                .add(CartCol::UserId.eq(user.user_id))
                .add(CartCol::MenuItemId.eq(menu_item_id)),
        )
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: CartActive = line.into();
    active.quantity = Set(quantity);
    let line = active.update(state.db()).await?;

    Ok(ApiResponse::success("OK", cart_item_from_entity(line), None))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    menu_item_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = CartItems::delete_many()
        .filter(CartCol::MenuItemId.eq(menu_item_id))
        .filter(CartCol::UserId.eq(user.user_id))
        .exec(state.db())
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state.db(),
        Some(user.user_id),
        "cart_remove",
        "cart_items",
        serde_json::json!({ "menu_item_id": menu_item_id }),
    )
    .await;

    Ok(ApiResponse::done("Removed from cart"))
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let result = CartItems::delete_many()
        .filter(CartCol::UserId.eq(user.user_id))
        .exec(state.db())
        .await?;
    tracing::debug!(user_id = %user.user_id, removed = result.rows_affected, "cart cleared");

    Ok(ApiResponse::success(
        "Cart cleared",
        cart_view(Vec::new())?,
        Some(Meta::empty()),
    ))
}

pub fn cart_view(items: Vec<CartItem>) -> AppResult<CartView> {
    let summary = if items.is_empty() {
        PriceSummary::zero()
    } else {
        pricing::summarize(items.iter().map(|line| (line.price, line.quantity)))?
    };
    let item_count = items.iter().map(|line| i64::from(line.quantity)).sum();
    Ok(CartView {
        items,
        item_count,
        summary,
    })
}

pub(crate) fn cart_item_from_entity(model: CartModel) -> CartItem {
    CartItem {
        id: model.id,
        menu_item_id: model.menu_item_id,
        name: model.name,
        price: model.price,
        category_id: model.category_id,
        image_url: model.image_url,
        description: model.description,
        quantity: model.quantity,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
