mod http_test;
mod recipe_list_test;
mod recipe_test;
