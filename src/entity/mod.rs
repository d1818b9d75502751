pub mod food_items;
pub mod order_items;
pub mod orders;
pub mod staff;

pub use food_items::Entity as FoodItems;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use staff::Entity as StaffMembers;
