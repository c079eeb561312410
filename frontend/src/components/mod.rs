pub mod topsis_form;
