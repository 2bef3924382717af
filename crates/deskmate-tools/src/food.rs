// SPDX-FileCopyrightText: 2026 Deskmate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock food ordering subsystem and its tools.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use deskmate_core::DeskmateError;
use serde::{Deserialize, Serialize};

use crate::tool::{now_rfc3339, prefixed_id, Tool, ToolOutput};

/// Known menu items keyed by lowercase short name.
const MENU: [(&str, &str, u32); 12] = [
    ("biryani", "Chicken Biryani", 180),
    ("pizza", "Margherita Pizza", 250),
    ("burger", "Veg Burger", 120),
    ("pasta", "Alfredo Pasta", 200),
    ("salad", "Caesar Salad", 150),
    ("sandwich", "Club Sandwich", 140),
    ("coffee", "Cappuccino", 80),
    ("tea", "Masala Chai", 40),
    ("dosa", "Masala Dosa", 90),
    ("idli", "Idli Sambar", 60),
    ("thali", "Veg Thali", 160),
    ("noodles", "Hakka Noodles", 130),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub price: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodOrder {
    pub id: String,
    pub employee_id: String,
    pub items: Vec<OrderItem>,
    pub delivery_location: String,
    pub status: String,
    pub total_amount: u32,
    pub estimated_delivery: String,
    pub created_at: String,
}

/// In-memory food ordering system keyed by employee id.
#[derive(Default)]
pub struct FoodSystem {
    orders: DashMap<String, Vec<FoodOrder>>,
}

impl FoodSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places an order. Unknown items are accepted at a flat price of 100.
    /// The biryani default applies only when `items` is absent; an explicit
    /// empty list yields an empty zero-total order.
    pub fn order(&self, employee_id: &str, args: &serde_json::Value) -> FoodOrder {
        let requested: Vec<String> = args
            .get("items")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|| vec!["biryani".to_string()]);

        let items: Vec<OrderItem> = requested
            .iter()
            .map(|raw| {
                let lookup = raw.to_lowercase();
                match MENU.iter().find(|(key, _, _)| *key == lookup) {
                    Some((_, name, price)) => OrderItem {
                        name: (*name).to_string(),
                        price: *price,
                        quantity: 1,
                    },
                    None => OrderItem {
                        name: raw.clone(),
                        price: 100,
                        quantity: 1,
                    },
                }
            })
            .collect();

        let total_amount = items.iter().map(|i| i.price * i.quantity).sum();
        let order = FoodOrder {
            id: prefixed_id("FOOD"),
            employee_id: employee_id.to_string(),
            items,
            delivery_location: args
                .get("deliveryLocation")
                .and_then(|v| v.as_str())
                .unwrap_or("Desk")
                .to_string(),
            status: "PREPARING".to_string(),
            total_amount,
            estimated_delivery: (Utc::now() + Duration::minutes(30)).to_rfc3339(),
            created_at: now_rfc3339(),
        };

        self.orders
            .entry(employee_id.to_string())
            .or_default()
            .push(order.clone());
        order
    }

    pub fn orders(&self, employee_id: &str) -> Vec<FoodOrder> {
        self.orders
            .get(employee_id)
            .map(|o| o.clone())
            .unwrap_or_default()
    }

    /// The cafeteria menu, grouped by category.
    pub fn menu(&self) -> serde_json::Value {
        serde_json::json!([
            {
                "category": "Main Course",
                "items": [
                    { "name": "Chicken Biryani", "price": 180 },
                    { "name": "Margherita Pizza", "price": 250 },
                    { "name": "Alfredo Pasta", "price": 200 },
                    { "name": "Veg Thali", "price": 160 },
                    { "name": "Masala Dosa", "price": 90 }
                ]
            },
            {
                "category": "Snacks",
                "items": [
                    { "name": "Veg Burger", "price": 120 },
                    { "name": "Club Sandwich", "price": 140 },
                    { "name": "Idli Sambar", "price": 60 },
                    { "name": "Hakka Noodles", "price": 130 }
                ]
            },
            {
                "category": "Salads",
                "items": [
                    { "name": "Caesar Salad", "price": 150 },
                    { "name": "Greek Salad", "price": 170 }
                ]
            },
            {
                "category": "Beverages",
                "items": [
                    { "name": "Cappuccino", "price": 80 },
                    { "name": "Masala Chai", "price": 40 },
                    { "name": "Fresh Juice", "price": 70 }
                ]
            }
        ])
    }
}

/// `order_food` tool.
pub struct OrderFoodTool(pub Arc<FoodSystem>);

#[async_trait]
impl Tool for OrderFoodTool {
    fn name(&self) -> &str {
        "order_food"
    }

    fn description(&self) -> &str {
        "Order food from the office cafeteria. Available items: biryani, pizza, burger, pasta, salad, sandwich, coffee, tea, dosa, idli, thali, noodles"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "List of food items to order"
                },
                "deliveryLocation": { "type": "string", "description": "Where to deliver the food (e.g., \"Desk 42\", \"Conference Room B\")" }
            },
            "required": ["items"]
        })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.order(employee_id, &input)))
    }
}

/// `get_food_orders` tool.
pub struct GetFoodOrdersTool(pub Arc<FoodSystem>);

#[async_trait]
impl Tool for GetFoodOrdersTool {
    fn name(&self) -> &str {
        "get_food_orders"
    }

    fn description(&self) -> &str {
        "Get all food orders for the employee"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(
        &self,
        employee_id: &str,
        _input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.orders(employee_id)))
    }
}

/// `get_food_menu` tool.
pub struct GetFoodMenuTool(pub Arc<FoodSystem>);

#[async_trait]
impl Tool for GetFoodMenuTool {
    fn name(&self) -> &str {
        "get_food_menu"
    }

    fn description(&self) -> &str {
        "Get the cafeteria food menu with prices"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(
        &self,
        _employee_id: &str,
        _input: serde_json::Value,
    ) -> Result<ToolOutput, DeskmateError> {
        Ok(ToolOutput::json(&self.0.menu()))
    }
}
